use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::auth::jwt::create_token;
use crate::domain::user::{Email, Role, User};
use crate::services::{IdentityService, NewUser};

/// Request body for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub company: Option<String>,
}

/// Request body for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User shape returned to callers; never carries the password hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.to_string(),
            role: user.role,
            company: user.company.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// Response from login and registration: the user plus a session token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

fn session_for(user: &User, secret: &str) -> Result<AuthResponse, ApiError> {
    let token = create_token(user.id, secret)
        .map_err(|e| ApiError::internal_server_error(format!("Failed to create token: {}", e)))?;
    Ok(AuthResponse {
        user: UserResponse::from(user),
        token,
    })
}

/// Register a new user
///
/// POST /api/auth/register
///
/// Registration auto-authenticates: the response carries a token just
/// like login does.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let email =
        Email::new(&req.email).map_err(|e| ApiError::bad_request(format!("Invalid email: {}", e)))?;

    if req.password.len() < 6 {
        return Err(ApiError::bad_request(
            "Password must be at least 6 characters",
        ));
    }

    let identity = IdentityService::new(state.users.clone());
    let user = identity
        .register(NewUser {
            name: req.name,
            email,
            password: req.password,
            role: req.role,
            company: req.company,
            avatar: None,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(session_for(&user, &state.jwt_secret)?),
    ))
}

/// Login with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    // An unparseable email can't belong to any account; answer exactly
    // like any other failed credential check.
    let email = Email::new(&req.email).map_err(|_| ApiError::unauthorized("invalid credentials"))?;

    let identity = IdentityService::new(state.users.clone());
    let user = identity.authenticate(&email, &req.password).await?;

    Ok(Json(session_for(&user, &state.jwt_secret)?))
}

/// Who am I
///
/// GET /api/auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

/// Logout
///
/// POST /api/auth/logout
///
/// Sessions are bearer tokens; discarding the token is the logout. The
/// endpoint exists so the frontend has something to call and always
/// succeeds.
pub async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
