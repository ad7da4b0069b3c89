use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::{Role, User};

/// A single entry in a project's discussion thread
///
/// Comments are immutable once appended: there is no edit or delete
/// flow, and `user_role` is a snapshot of the author's role at posting
/// time rather than a live reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_role: Role,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Builds a comment attributed to `author`, stamped with the current
    /// time. Message validation happens on the aggregate, not here.
    pub fn posted_by(author: &User, project_id: Uuid, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            user_id: author.id,
            user_name: author.name.clone(),
            user_role: author.role,
            message,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Email;

    #[test]
    fn comment_snapshots_author_fields() {
        let author = User {
            id: Uuid::new_v4(),
            name: "Lara".into(),
            email: Email::new("lara@todaarte.com").unwrap(),
            password_hash: "hash".into(),
            role: Role::Admin,
            company: None,
            avatar: None,
        };
        let project_id = Uuid::new_v4();

        let comment = Comment::posted_by(&author, project_id, "Primeira versão pronta".into());

        assert_eq!(comment.project_id, project_id);
        assert_eq!(comment.user_id, author.id);
        assert_eq!(comment.user_name, "Lara");
        assert_eq!(comment.user_role, Role::Admin);
    }
}
