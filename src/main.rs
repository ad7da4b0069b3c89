use axum::Router;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use todaarte_api::api::{self, AppState};
use todaarte_api::domain::errors::DomainError;
use todaarte_api::domain::user::{Email, Role};
use todaarte_api::infrastructure::repositories::memory::{
    InMemoryCatalogRepository, InMemoryProjectRepository, InMemoryUserRepository,
};
use todaarte_api::infrastructure::repositories::{
    PostgresCatalogRepository, PostgresProjectRepository, PostgresUserRepository,
};
use todaarte_api::infrastructure::seed;
use todaarte_api::services::{IdentityService, NewUser};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set, using development default");
        "dev-secret-key".to_string()
    });

    let state = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await
                .expect("Failed to connect to database");

            sqlx::migrate!()
                .run(&pool)
                .await
                .expect("Failed to run migrations");
            tracing::info!("Database connected successfully");

            AppState {
                users: Arc::new(PostgresUserRepository::new(pool.clone())),
                projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
                catalog: Arc::new(PostgresCatalogRepository::new(pool)),
                jwt_secret,
            }
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, running on in-memory demo storage");

            let users = Arc::new(InMemoryUserRepository::new());
            let projects = Arc::new(InMemoryProjectRepository::new());
            seed::seed_demo_data(users.as_ref(), projects.as_ref())
                .await
                .expect("Failed to seed demo data");

            let (portfolio, services) = seed::demo_catalog();
            AppState {
                users,
                projects,
                catalog: Arc::new(InMemoryCatalogRepository::new(portfolio, services)),
                jwt_secret,
            }
        }
    };

    bootstrap_admin(&state).await;

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Everything that is not the API falls through to the built
    // frontend; unknown paths get index.html so SPA routing works.
    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "dist".to_string());
    let frontend = ServeDir::new(&static_dir)
        .fallback(ServeFile::new(format!("{static_dir}/index.html")));

    // Build router
    let app: Router = api::router(state)
        .fallback_service(frontend)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}

/// Provisions the configured admin account on first start
///
/// Replaces the old one-off hash script: set `ADMIN_EMAIL` and
/// `ADMIN_PASSWORD` and the account exists when the server is up. An
/// already-registered email is left untouched.
async fn bootstrap_admin(state: &AppState) {
    let (Ok(email), Ok(password)) = (
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) else {
        return;
    };

    let email = match Email::new(&email) {
        Ok(email) => email,
        Err(e) => {
            tracing::warn!("ADMIN_EMAIL invalid, skipping bootstrap: {e}");
            return;
        }
    };

    let identity = IdentityService::new(state.users.clone());
    let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin".to_string());

    match identity
        .register(NewUser {
            name,
            email: email.clone(),
            password,
            role: Role::Admin,
            company: None,
            avatar: None,
        })
        .await
    {
        Ok(user) => tracing::info!(user_id = %user.id, "bootstrapped admin account"),
        Err(DomainError::DuplicateEmail) => {
            tracing::debug!(%email, "admin account already present");
        }
        Err(e) => tracing::warn!("admin bootstrap failed: {e}"),
    }
}
