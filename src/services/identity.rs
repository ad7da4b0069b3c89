use std::sync::Arc;
use uuid::Uuid;

use crate::auth::password::{burn_verification, hash_password, verify_password};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::UserRepository;
use crate::domain::user::{Email, Role, User};

/// Registration input; the plaintext password never outlives this call
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password: String,
    pub role: Role,
    pub company: Option<String>,
    pub avatar: Option<String>,
}

/// The identity store: registration, credential checks, and lookups
///
/// Holds no state of its own; everything lives behind the repository
/// port so the same logic runs against Postgres or the in-memory store.
#[derive(Clone)]
pub struct IdentityService {
    users: Arc<dyn UserRepository>,
}

impl IdentityService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Registers a new account
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user, hash included (callers building
    ///   transport responses must strip it via their DTOs)
    /// * `Err(DuplicateEmail)` - The email is already registered
    ///
    /// The pre-check and the unique index both map to `DuplicateEmail`,
    /// so a racing second registration fails the same way and leaves no
    /// record behind. Company is only meaningful for clients; an avatar
    /// defaults to a generated placeholder like the original signup did.
    pub async fn register(&self, new_user: NewUser) -> DomainResult<User> {
        if self.users.find_by_email(&new_user.email).await?.is_some() {
            return Err(DomainError::DuplicateEmail);
        }

        let password_hash =
            hash_password(&new_user.password).map_err(DomainError::Storage)?;

        let avatar = new_user.avatar.unwrap_or_else(|| {
            format!(
                "https://ui-avatars.com/api/?name={}",
                new_user.name.replace(' ', "+")
            )
        });

        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash,
            role: new_user.role,
            company: match new_user.role {
                Role::Client => new_user.company,
                Role::Admin => None,
            },
            avatar: Some(avatar),
        };

        self.users.create(&user).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "registered new user");

        Ok(user)
    }

    /// Checks credentials and returns the matching user
    ///
    /// Unknown email and wrong password fail identically: same error,
    /// and the unknown-email path burns a bcrypt verification so the
    /// two are not separable by timing either.
    pub async fn authenticate(&self, email: &Email, password: &str) -> DomainResult<User> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                burn_verification(password);
                return Err(DomainError::InvalidCredentials);
            }
        };

        let valid =
            verify_password(password, &user.password_hash).map_err(DomainError::Storage)?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        self.users.find_by_id(id).await
    }
}
