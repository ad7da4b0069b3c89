use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::project::{Comment, Project, ProjectStatus};

/// Listing filter for the admin project overview
///
/// `search` matches case-insensitively as a plain substring against the
/// project title or the client name, mirroring the dashboard search box.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub search: Option<String>,
}

impl ProjectFilter {
    /// Applies the filter to one project; shared by implementations
    /// that filter in memory.
    pub fn matches(&self, project: &Project) -> bool {
        if let Some(status) = self.status {
            if project.status() != status {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_title = project.title().to_lowercase().contains(&needle);
            let in_client = project.client_name().to_lowercase().contains(&needle);
            if !in_title && !in_client {
                return false;
            }
        }
        true
    }
}

/// Repository trait for the Project aggregate
///
/// Scalar-field updates and comment appends are separate writes so two
/// concurrent requests touching the same project (a status change and a
/// comment, say) lose neither: the comment path only inserts the new
/// row and bumps `updated_at`.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Persist a newly opened project
    async fn create(&self, project: &Project) -> DomainResult<()>;

    /// Persist the scalar fields of an existing project
    async fn update(&self, project: &Project) -> DomainResult<()>;

    /// Append one comment and move the parent's `updated_at`
    async fn append_comment(
        &self,
        project_id: Uuid,
        comment: &Comment,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()>;

    /// Find a project with its full comment thread
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Project>>;

    /// All projects owned by one client, in insertion order
    async fn list_for_client(&self, client_id: Uuid) -> DomainResult<Vec<Project>>;

    /// All projects matching the filter, in insertion order
    async fn list_all(&self, filter: &ProjectFilter) -> DomainResult<Vec<Project>>;
}
