use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::comment::Comment;
use super::value_objects::ProjectStatus;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::User;

/// Fields required to open a new project for a client
#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub category: String,
    pub images: Vec<String>,
    pub client_id: Uuid,
    pub client_name: String,
    pub budget: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
}

/// Partial update applied to a project; `None` leaves a field untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
    pub status: Option<ProjectStatus>,
    pub client_name: Option<String>,
    pub budget: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
}

impl ProjectUpdate {
    /// True when the update touches anything beyond the status field.
    /// Detail edits are an admin-only capability.
    pub fn edits_details(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.category.is_some()
            || self.images.is_some()
            || self.client_name.is_some()
            || self.budget.is_some()
            || self.deadline.is_some()
    }
}

/// Project aggregate root
///
/// A project and its comment thread form one consistency unit: comments
/// never outlive their project and every mutation, comment appends
/// included, refreshes `updated_at`.
///
/// # Invariants
/// - `updated_at` strictly increases on every successful mutation
/// - `comments` is append-only and kept in insertion order
/// - New projects always start in `Pending` with an empty thread
#[derive(Debug, Clone)]
pub struct Project {
    id: Uuid,
    title: String,
    description: String,
    category: String,
    images: Vec<String>,
    status: ProjectStatus,
    client_id: Uuid,
    client_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    budget: Option<Decimal>,
    deadline: Option<NaiveDate>,
    comments: Vec<Comment>,
}

impl Project {
    /// Opens a new project in the initial `Pending` state
    ///
    /// The caller is responsible for having resolved `client_id` to an
    /// existing Client user; the aggregate does not see the user store.
    pub fn open(draft: NewProject) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            images: draft.images,
            status: ProjectStatus::Pending,
            client_id: draft.client_id,
            client_name: draft.client_name,
            created_at: now,
            updated_at: now,
            budget: draft.budget,
            deadline: draft.deadline,
            comments: Vec::new(),
        }
    }

    /// Applies a partial field update and refreshes `updated_at`
    ///
    /// Status values are accepted as-is here; which transitions a given
    /// actor may trigger is the authorization gate's decision, made
    /// before this method is reached.
    pub fn apply(&mut self, update: ProjectUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(images) = update.images {
            self.images = images;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(client_name) = update.client_name {
            self.client_name = client_name;
        }
        if let Some(budget) = update.budget {
            self.budget = Some(budget);
        }
        if let Some(deadline) = update.deadline {
            self.deadline = Some(deadline);
        }
        self.touch();
    }

    /// Appends a comment attributed to `author`
    ///
    /// # Returns
    /// * `Ok(Comment)` - The appended comment
    /// * `Err(EmptyMessage)` - When the message is empty or whitespace
    pub fn add_comment(&mut self, author: &User, message: &str) -> DomainResult<Comment> {
        if message.trim().is_empty() {
            return Err(DomainError::EmptyMessage);
        }

        let comment = Comment::posted_by(author, self.id, message.to_string());
        self.comments.push(comment.clone());
        self.touch();

        Ok(comment)
    }

    // The wall clock may not have advanced between two mutations in the
    // same request burst; bump by a microsecond so updated_at still
    // strictly increases.
    fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + chrono::Duration::microseconds(1)
        };
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn client_id(&self) -> Uuid {
        self.client_id
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn budget(&self) -> Option<Decimal> {
        self.budget
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Reconstructs a Project from persistence layer data
    ///
    /// Bypasses the aggregate's creation defaults since the stored data
    /// already went through them. Only for repository implementations.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        id: Uuid,
        title: String,
        description: String,
        category: String,
        images: Vec<String>,
        status: ProjectStatus,
        client_id: Uuid,
        client_name: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        budget: Option<Decimal>,
        deadline: Option<NaiveDate>,
        comments: Vec<Comment>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            category,
            images,
            status,
            client_id,
            client_name,
            created_at,
            updated_at,
            budget,
            deadline,
            comments,
        }
    }
}
