//! End-to-end API integration tests
//!
//! These tests drive the real router over the in-memory storage
//! adapters, covering registration and login, session handling, the
//! role-scoped project workflow, comment threads, and the public
//! landing content. No external services are required.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for oneshot

use todaarte_api::api::{router, AppState};
use todaarte_api::infrastructure::repositories::memory::{
    InMemoryCatalogRepository, InMemoryProjectRepository, InMemoryUserRepository,
};
use todaarte_api::infrastructure::seed;

/// Setup test application with the demo seed loaded
async fn setup_app() -> Router {
    let users = Arc::new(InMemoryUserRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::new());
    seed::seed_demo_data(users.as_ref(), projects.as_ref())
        .await
        .expect("seed demo data");

    let (portfolio, services) = seed::demo_catalog();
    router(AppState {
        users,
        projects,
        catalog: Arc::new(InMemoryCatalogRepository::new(portfolio, services)),
        jwt_secret: "test-secret".into(),
    })
}

/// Fires one request and returns status plus parsed JSON body
/// (`Value::Null` for empty bodies)
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

/// Registers a fresh client and returns `(user_id, token)`
async fn register_client(app: &Router, name: &str, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "password": "demo123",
            "role": "client",
            "company": "Empresa XYZ"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    (
        body["user"]["id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

async fn admin_token(app: &Router) -> String {
    let (status, body) = login(app, "admin@todaarte.com", "demo123").await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

/// Creates a project for the given client and returns its id
async fn create_project(app: &Router, admin: &str, client_id: &str, title: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/projects",
        Some(admin),
        Some(json!({
            "title": title,
            "description": "Institutional site",
            "category": "Web Design",
            "client_id": client_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_register_returns_session_without_password() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "João",
            "email": "joao@x.com",
            "password": "demo123",
            "role": "client"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "joao@x.com");
    assert_eq!(body["user"]["role"], "client");
    // No password material in any shape.
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());

    // Registration auto-authenticates: the token works immediately.
    let token = body["token"].as_str().unwrap();
    let (status, me) = send(&app, "GET", "/api/auth/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "joao@x.com");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = setup_app().await;
    register_client(&app, "João", "joao@x.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Outro João",
            "email": "joao@x.com",
            "password": "outro123",
            "role": "client"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("registered"));

    // The original account is untouched.
    let (status, _) = login(&app, "joao@x.com", "demo123").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = login(&app, "joao@x.com", "outro123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = setup_app().await;

    let (unknown_status, unknown_body) = login(&app, "nobody@todaarte.com", "demo123").await;
    let (wrong_status, wrong_body) = login(&app, "admin@todaarte.com", "wrong-password").await;

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_body, wrong_body);
}

#[tokio::test]
async fn test_login_seeded_admin() {
    let app = setup_app().await;

    let (status, body) = login(&app, "admin@todaarte.com", "demo123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["name"], "Admin Toda Arte");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_session_restore_rejects_corrupt_token() {
    let app = setup_app().await;

    let (status, _) = send(&app, "GET", "/api/auth/me", Some("garbage.token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_always_succeeds() {
    let app = setup_app().await;

    let (status, _) = send(&app, "POST", "/api/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_project_listing_is_role_scoped() {
    let app = setup_app().await;
    let admin = admin_token(&app).await;
    let (maria_id, maria_token) = register_client(&app, "Maria", "maria@x.com").await;
    let (_, pedro_token) = register_client(&app, "Pedro", "pedro@x.com").await;

    let project_id = create_project(&app, &admin, &maria_id, "Website Maria").await;

    // Maria sees exactly her project.
    let (status, body) = send(&app, "GET", "/api/projects", Some(&maria_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Website Maria"]);

    // Pedro sees nothing and cannot fetch Maria's project directly.
    let (_, body) = send(&app, "GET", "/api/projects", Some(&pedro_token), None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/projects/{project_id}"),
        Some(&pedro_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The admin overview includes the seeded sample plus Maria's.
    let (_, body) = send(&app, "GET", "/api/projects", Some(&admin), None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    // Anonymous callers get nothing at all.
    let (status, _) = send(&app, "GET", "/api/projects", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_client_approval_flow() {
    let app = setup_app().await;
    let admin = admin_token(&app).await;
    let (client_id, client_token) = register_client(&app, "Maria", "maria@x.com").await;
    let project_id = create_project(&app, &admin, &client_id, "Identidade Visual").await;

    // Admin moves the work into review.
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/projects/{project_id}"),
        Some(&admin),
        Some(json!({ "status": "review" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The owning client approves it.
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/projects/{project_id}"),
        Some(&client_token),
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");

    // But completing is not a client transition.
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/projects/{project_id}"),
        Some(&client_token),
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Neither is editing details.
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/projects/{project_id}"),
        Some(&client_token),
        Some(json!({ "title": "Meu título" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_comment_thread() {
    let app = setup_app().await;
    let admin = admin_token(&app).await;
    let (client_id, client_token) = register_client(&app, "Maria", "maria@x.com").await;
    let (_, stranger_token) = register_client(&app, "Pedro", "pedro@x.com").await;
    let project_id = create_project(&app, &admin, &client_id, "Campanha").await;

    let (_, before) = send(
        &app,
        "GET",
        &format!("/api/projects/{project_id}"),
        Some(&client_token),
        None,
    )
    .await;

    // Owner comments; status stays put, updated_at advances.
    let (status, comment) = send(
        &app,
        "POST",
        &format!("/api/projects/{project_id}/comments"),
        Some(&client_token),
        Some(json!({ "message": "Gostei da proposta" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["user_role"], "client");

    let (_, after) = send(
        &app,
        "GET",
        &format!("/api/projects/{project_id}"),
        Some(&client_token),
        None,
    )
    .await;
    assert_eq!(after["status"], before["status"]);
    let parse = |v: &Value| {
        chrono::DateTime::parse_from_rfc3339(v["updated_at"].as_str().unwrap()).unwrap()
    };
    assert!(parse(&after) > parse(&before), "comment must advance updated_at");
    assert_eq!(after["comments"].as_array().unwrap().len(), 1);

    // A stranger cannot comment on it.
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/projects/{project_id}/comments"),
        Some(&stranger_token),
        Some(json!({ "message": "oi" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Whitespace-only messages are rejected.
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/projects/{project_id}/comments"),
        Some(&client_token),
        Some(json!({ "message": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_listing_filters() {
    let app = setup_app().await;
    let admin = admin_token(&app).await;

    // Seeded sample: "Redesign da Marca" for João Silva, in review.
    let (status, body) = send(
        &app,
        "GET",
        "/api/projects?search=redesign",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Case-insensitive, and client names match too.
    let (_, body) = send(
        &app,
        "GET",
        "/api/projects?search=SILVA",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = send(
        &app,
        "GET",
        "/api/projects?status=review",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = send(
        &app,
        "GET",
        "/api/projects?status=completed",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_project_validates_client() {
    let app = setup_app().await;
    let admin = admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/projects",
        Some(&admin),
        Some(json!({
            "title": "Fantasma",
            "description": "sem dono",
            "category": "Branding",
            "client_id": uuid::Uuid::new_v4()
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("client"));
}

#[tokio::test]
async fn test_clients_cannot_create_projects() {
    let app = setup_app().await;
    let (client_id, client_token) = register_client(&app, "Maria", "maria@x.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/projects",
        Some(&client_token),
        Some(json!({
            "title": "Próprio",
            "description": "...",
            "category": "Branding",
            "client_id": client_id
        })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_landing_content_is_public() {
    let app = setup_app().await;

    let (status, body) = send(&app, "GET", "/api/portfolio", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["featured"], true);

    let (status, body) = send(&app, "GET", "/api/services", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
}
