// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod middleware;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::domain::repositories::{CatalogRepository, ProjectRepository, UserRepository};

/// Shared application state: the storage ports and the token secret
///
/// Handlers build the services they need from these. There is no
/// ambient "current user" anywhere; identity always arrives through
/// the request extractor.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub jwt_secret: String,
}

/// Builds the API router; `main` layers CORS, tracing, and the static
/// frontend fallback on top of this
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::auth::health_check))
        // Auth routes
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/me", get(handlers::auth::me))
        .route("/api/auth/logout", post(handlers::auth::logout))
        // Project routes
        .route(
            "/api/projects",
            post(handlers::projects::create_project).get(handlers::projects::list_projects),
        )
        .route(
            "/api/projects/:id",
            get(handlers::projects::get_project).patch(handlers::projects::update_project),
        )
        .route(
            "/api/projects/:id/comments",
            post(handlers::projects::add_comment),
        )
        // Public landing content
        .route("/api/portfolio", get(handlers::catalog::list_portfolio))
        .route("/api/services", get(handlers::catalog::list_services))
        // Shared state
        .with_state(state)
}
