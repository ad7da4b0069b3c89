use uuid::Uuid;

use super::value_objects::{Email, Role};

/// A registered account: agency staff (admin) or a portal client
///
/// The password hash never appears in any value handed to transport
/// callers; response DTOs are built from the public fields only.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub role: Role,
    pub company: Option<String>,
    pub avatar: Option<String>,
}

impl User {
    /// True when this user owns the given client id, i.e. the project's
    /// `client_id` points at them.
    pub fn owns_client_id(&self, client_id: Uuid) -> bool {
        self.id == client_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test".into(),
            email: Email::new("t@example.com").unwrap(),
            password_hash: "hash".into(),
            role,
            company: None,
            avatar: None,
        }
    }

    #[test]
    fn owns_own_client_id_only() {
        let user = sample(Role::Client);
        assert!(user.owns_client_id(user.id));
        assert!(!user.owns_client_id(Uuid::new_v4()));
    }
}
