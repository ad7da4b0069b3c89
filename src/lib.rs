//! Toda Arte portal API
//!
//! Backend for the agency's marketing site and client portal: identity
//! and sessions, the project workflow with its comment threads, the
//! authorization gate between roles, and the public landing content.

pub mod api;
pub mod auth;
pub mod domain;
pub mod infrastructure;
pub mod services;
