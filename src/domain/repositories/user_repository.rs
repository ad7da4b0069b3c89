use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::user::{Email, User};

/// Repository trait for the users table
///
/// Implementations back this with a unique index (or equivalent) on
/// email; `create` reports a clash as `DuplicateEmail` so the race
/// between a pre-check and the insert still resolves correctly.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. Fails with `DuplicateEmail` when the email
    /// is already taken.
    async fn create(&self, user: &User) -> DomainResult<()>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;

    /// Find a user by email address (exact match as stored)
    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>>;
}
