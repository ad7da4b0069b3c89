use thiserror::Error;
use uuid::Uuid;

/// Failures surfaced by the identity and project stores
///
/// Every variant except `Storage` is terminal for the request: retrying
/// without changing the input cannot succeed. `Storage` covers the
/// persistence layer being unreachable and is the only retryable kind.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Login failed. Deliberately identical for an unknown email and a
    /// wrong password so callers cannot probe which emails are registered.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email is already registered")]
    DuplicateEmail,

    #[error("project not found: {0}")]
    ProjectNotFound(Uuid),

    #[error("user not found: {0}")]
    UserNotFound(Uuid),

    /// The authorization gate rejected the action for the acting user.
    #[error("action not permitted for this user")]
    Forbidden,

    #[error("comment message cannot be empty")]
    EmptyMessage,

    /// The referenced client id does not resolve to a user with the
    /// Client role.
    #[error("not a valid client: {0}")]
    InvalidClient(Uuid),

    #[error("storage failure (try again): {0}")]
    Storage(String),
}

impl DomainError {
    /// True only for failures worth retrying without changing the input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Storage(_))
    }
}

/// Convenience alias used throughout the stores and services.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_storage_is_retryable() {
        assert!(DomainError::Storage("connection refused".into()).is_retryable());
        assert!(!DomainError::InvalidCredentials.is_retryable());
        assert!(!DomainError::DuplicateEmail.is_retryable());
        assert!(!DomainError::Forbidden.is_retryable());
        assert!(!DomainError::EmptyMessage.is_retryable());
    }

    #[test]
    fn credential_failure_does_not_name_the_email() {
        let msg = DomainError::InvalidCredentials.to_string();
        assert_eq!(msg, "invalid credentials");
    }
}
