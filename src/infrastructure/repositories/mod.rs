// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod memory;
pub mod postgres_catalog_repository;
pub mod postgres_project_repository;
pub mod postgres_user_repository;

pub use postgres_catalog_repository::PostgresCatalogRepository;
pub use postgres_project_repository::PostgresProjectRepository;
pub use postgres_user_repository::PostgresUserRepository;
