use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::auth::jwt::verify_token;
use crate::domain::user::User;

/// Authenticated-user extractor for protected routes
///
/// Resolves the bearer token to a full user record on every request, so
/// handlers receive the actor's current role rather than whatever was
/// true when the token was minted. Any structural problem with the
/// session (missing header, bad format, bad signature, expiry, or a
/// subject that no longer resolves) collapses to anonymous, which on a
/// protected route means 401.
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>")
        })?;

        let claims = verify_token(token, &state.jwt_secret)
            .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

        let user = state
            .users
            .find_by_id(claims.sub)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::unauthorized("Session user no longer exists"))?;

        Ok(CurrentUser(user))
    }
}
