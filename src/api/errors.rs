use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::errors::DomainError;

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 401 Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

/// Maps the domain taxonomy onto transport codes
///
/// Terminal failures land on 4xx ("change the input"); only `Storage`
/// becomes a 5xx, and its message already carries the retry hint.
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            DomainError::DuplicateEmail => StatusCode::CONFLICT,
            DomainError::ProjectNotFound(_) | DomainError::UserNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            DomainError::Forbidden => StatusCode::FORBIDDEN,
            DomainError::EmptyMessage | DomainError::InvalidClient(_) => StatusCode::BAD_REQUEST,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn domain_errors_map_to_expected_codes() {
        let cases = [
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::DuplicateEmail, StatusCode::CONFLICT),
            (
                DomainError::ProjectNotFound(Uuid::new_v4()),
                StatusCode::NOT_FOUND,
            ),
            (DomainError::Forbidden, StatusCode::FORBIDDEN),
            (DomainError::EmptyMessage, StatusCode::BAD_REQUEST),
            (
                DomainError::InvalidClient(Uuid::new_v4()),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::Storage("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, code) in cases {
            assert_eq!(ApiError::from(err).status, code);
        }
    }

    #[test]
    fn storage_message_carries_retry_hint() {
        let api: ApiError = DomainError::Storage("connection refused".into()).into();
        assert!(api.message.contains("try again"));
    }
}
