//! In-memory repository implementations
//!
//! Back the same ports as the Postgres adapters with plain vectors
//! behind an `RwLock`. Used by the test suites and as the storage
//! engine when no `DATABASE_URL` is configured; the lock serializes
//! writers, which is all the single-aggregate model needs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::RwLock;
use uuid::Uuid;

use crate::domain::catalog::{PortfolioItem, Service};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::project::{Comment, Project};
use crate::domain::repositories::{
    CatalogRepository, ProjectFilter, ProjectRepository, UserRepository,
};
use crate::domain::user::{Email, User};

fn poisoned() -> DomainError {
    DomainError::Storage("in-memory store lock poisoned".into())
}

/// Users held in registration order
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> DomainResult<()> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::DuplicateEmail);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.iter().find(|u| &u.email == email).cloned())
    }
}

/// Projects held in creation order, comments embedded
#[derive(Default)]
pub struct InMemoryProjectRepository {
    projects: RwLock<Vec<Project>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

// Rebuilds a stored aggregate with new scalar fields, keeping the given
// comment thread. Mirrors the two separate write paths of the Postgres
// adapter so a field update never clobbers a concurrent comment append.
fn with_scalars(source: &Project, comments: Vec<Comment>) -> Project {
    Project::from_persistence(
        source.id(),
        source.title().to_string(),
        source.description().to_string(),
        source.category().to_string(),
        source.images().to_vec(),
        source.status(),
        source.client_id(),
        source.client_name().to_string(),
        source.created_at(),
        source.updated_at(),
        source.budget(),
        source.deadline(),
        comments,
    )
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, project: &Project) -> DomainResult<()> {
        let mut projects = self.projects.write().map_err(|_| poisoned())?;
        projects.push(project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> DomainResult<()> {
        let mut projects = self.projects.write().map_err(|_| poisoned())?;
        let slot = projects
            .iter_mut()
            .find(|p| p.id() == project.id())
            .ok_or(DomainError::ProjectNotFound(project.id()))?;
        *slot = with_scalars(project, slot.comments().to_vec());
        Ok(())
    }

    async fn append_comment(
        &self,
        project_id: Uuid,
        comment: &Comment,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut projects = self.projects.write().map_err(|_| poisoned())?;
        let slot = projects
            .iter_mut()
            .find(|p| p.id() == project_id)
            .ok_or(DomainError::ProjectNotFound(project_id))?;

        let mut comments = slot.comments().to_vec();
        comments.push(comment.clone());

        // Only the thread and the audit timestamp move on this path.
        *slot = Project::from_persistence(
            slot.id(),
            slot.title().to_string(),
            slot.description().to_string(),
            slot.category().to_string(),
            slot.images().to_vec(),
            slot.status(),
            slot.client_id(),
            slot.client_name().to_string(),
            slot.created_at(),
            updated_at,
            slot.budget(),
            slot.deadline(),
            comments,
        );
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Project>> {
        let projects = self.projects.read().map_err(|_| poisoned())?;
        Ok(projects.iter().find(|p| p.id() == id).cloned())
    }

    async fn list_for_client(&self, client_id: Uuid) -> DomainResult<Vec<Project>> {
        let projects = self.projects.read().map_err(|_| poisoned())?;
        Ok(projects
            .iter()
            .filter(|p| p.client_id() == client_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self, filter: &ProjectFilter) -> DomainResult<Vec<Project>> {
        let projects = self.projects.read().map_err(|_| poisoned())?;
        Ok(projects.iter().filter(|p| filter.matches(p)).cloned().collect())
    }
}

/// Static landing-page content, fixed at construction
pub struct InMemoryCatalogRepository {
    portfolio: Vec<PortfolioItem>,
    services: Vec<Service>,
}

impl InMemoryCatalogRepository {
    pub fn new(portfolio: Vec<PortfolioItem>, services: Vec<Service>) -> Self {
        Self { portfolio, services }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn list_portfolio(&self) -> DomainResult<Vec<PortfolioItem>> {
        let mut items = self.portfolio.clone();
        // Featured work leads the landing page grid.
        items.sort_by_key(|item| !item.featured);
        Ok(items)
    }

    async fn list_services(&self) -> DomainResult<Vec<Service>> {
        Ok(self.services.clone())
    }
}
