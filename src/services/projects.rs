use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::authorization::{can, may_create_projects, ProjectAction};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::project::{Comment, NewProject, Project, ProjectUpdate};
use crate::domain::repositories::{ProjectFilter, ProjectRepository, UserRepository};
use crate::domain::user::{Role, User};

/// Input for opening a project; `client_name` falls back to the
/// resolved client's display name when omitted
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub category: String,
    pub images: Vec<String>,
    pub client_id: Uuid,
    pub client_name: Option<String>,
    pub budget: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
}

/// The project store: lifecycle, listing, and the comment thread
///
/// Every operation takes the acting user explicitly and consults the
/// authorization gate before touching the repository; the repository
/// itself never checks roles.
#[derive(Clone)]
pub struct ProjectService {
    projects: Arc<dyn ProjectRepository>,
    users: Arc<dyn UserRepository>,
}

impl ProjectService {
    pub fn new(projects: Arc<dyn ProjectRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { projects, users }
    }

    /// Opens a project for a client (admin-only)
    ///
    /// # Returns
    /// * `Err(Forbidden)` - Actor is not an admin
    /// * `Err(InvalidClient)` - `client_id` is unknown or not a Client
    pub async fn create(&self, actor: &User, input: CreateProject) -> DomainResult<Project> {
        if !may_create_projects(actor) {
            return Err(DomainError::Forbidden);
        }

        let client = self
            .users
            .find_by_id(input.client_id)
            .await?
            .filter(|user| user.role == Role::Client)
            .ok_or(DomainError::InvalidClient(input.client_id))?;

        let project = Project::open(NewProject {
            title: input.title,
            description: input.description,
            category: input.category,
            images: input.images,
            client_id: client.id,
            client_name: input.client_name.unwrap_or_else(|| client.name.clone()),
            budget: input.budget,
            deadline: input.deadline,
        });

        self.projects.create(&project).await?;
        tracing::info!(project_id = %project.id(), client_id = %client.id, "opened project");

        Ok(project)
    }

    /// Fetches one project, gate-checked for the actor
    pub async fn get(&self, actor: &User, id: Uuid) -> DomainResult<Project> {
        let project = self.load(id).await?;
        if !can(actor, ProjectAction::View, &project) {
            return Err(DomainError::Forbidden);
        }
        Ok(project)
    }

    /// Lists projects visible to the actor, in insertion order
    ///
    /// Admins see everything matching the filter; clients see their own
    /// projects, with the same filter applied on top.
    pub async fn list(&self, actor: &User, filter: &ProjectFilter) -> DomainResult<Vec<Project>> {
        if actor.role.is_admin() {
            return self.projects.list_all(filter).await;
        }

        let mut own = self.projects.list_for_client(actor.id).await?;
        own.retain(|project| filter.matches(project));
        Ok(own)
    }

    /// Applies a partial update, gate-checked per changed aspect
    ///
    /// The store accepts any status value; which transitions the actor
    /// may trigger is decided by the gate. An empty patch counts as a
    /// detail edit so it stays admin-only.
    pub async fn update(
        &self,
        actor: &User,
        id: Uuid,
        update: ProjectUpdate,
    ) -> DomainResult<Project> {
        let mut project = self.load(id).await?;

        let mut actions = Vec::new();
        if let Some(to) = update.status {
            actions.push(ProjectAction::SetStatus {
                from: project.status(),
                to,
            });
        }
        if update.edits_details() || actions.is_empty() {
            actions.push(ProjectAction::EditDetails);
        }
        for action in actions {
            if !can(actor, action, &project) {
                return Err(DomainError::Forbidden);
            }
        }

        project.apply(update);
        self.projects.update(&project).await?;

        Ok(project)
    }

    /// Appends a comment to the project's thread
    ///
    /// # Returns
    /// * `Err(Forbidden)` - Actor may not comment on this project
    /// * `Err(EmptyMessage)` - Message is empty or whitespace-only
    pub async fn add_comment(
        &self,
        actor: &User,
        project_id: Uuid,
        message: &str,
    ) -> DomainResult<Comment> {
        let mut project = self.load(project_id).await?;

        if !can(actor, ProjectAction::Comment, &project) {
            return Err(DomainError::Forbidden);
        }

        let comment = project.add_comment(actor, message)?;
        self.projects
            .append_comment(project_id, &comment, project.updated_at())
            .await?;

        Ok(comment)
    }

    async fn load(&self, id: Uuid) -> DomainResult<Project> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ProjectNotFound(id))
    }
}
