// Infrastructure layer module
// Contains storage adapters and demo seed data
// Follows Hexagonal Architecture

pub mod repositories;
pub mod seed;
