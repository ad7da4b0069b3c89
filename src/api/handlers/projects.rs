use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::project::{Comment, Project, ProjectStatus, ProjectUpdate};
use crate::domain::repositories::ProjectFilter;
use crate::services::{CreateProject, ProjectService};

/// Request body for opening a project
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub client_id: Uuid,
    pub client_name: Option<String>,
    pub budget: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
}

/// Request body for appending a comment
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub message: String,
}

/// Listing filter taken from the query string
#[derive(Debug, Deserialize)]
pub struct ListProjectsQuery {
    pub status: Option<ProjectStatus>,
    pub search: Option<String>,
}

/// Project shape returned to callers, comment thread embedded
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub images: Vec<String>,
    pub status: ProjectStatus,
    pub client_id: Uuid,
    pub client_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub comments: Vec<Comment>,
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id(),
            title: project.title().to_string(),
            description: project.description().to_string(),
            category: project.category().to_string(),
            images: project.images().to_vec(),
            status: project.status(),
            client_id: project.client_id(),
            client_name: project.client_name().to_string(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
            budget: project.budget(),
            deadline: project.deadline(),
            comments: project.comments().to_vec(),
        }
    }
}

fn service(state: &AppState) -> ProjectService {
    ProjectService::new(state.projects.clone(), state.users.clone())
}

/// Open a new project (admin only)
///
/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let project = service(&state)
        .create(
            &actor,
            CreateProject {
                title: req.title,
                description: req.description,
                category: req.category,
                images: req.images,
                client_id: req.client_id,
                client_name: req.client_name,
                budget: req.budget,
                deadline: req.deadline,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ProjectResponse::from(&project))))
}

/// List projects visible to the caller
///
/// GET /api/projects?status=&search=
pub async fn list_projects(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Query(query): Query<ListProjectsQuery>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let filter = ProjectFilter {
        status: query.status,
        search: query.search,
    };

    let projects = service(&state).list(&actor, &filter).await?;
    let responses = projects.iter().map(ProjectResponse::from).collect();

    Ok(Json(responses))
}

/// Fetch one project
///
/// GET /api/projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = service(&state).get(&actor, id).await?;
    Ok(Json(ProjectResponse::from(&project)))
}

/// Apply a partial update
///
/// PATCH /api/projects/:id
pub async fn update_project(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
    Json(update): Json<ProjectUpdate>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = service(&state).update(&actor, id, update).await?;
    Ok(Json(ProjectResponse::from(&project)))
}

/// Append a comment to a project's thread
///
/// POST /api/projects/:id/comments
pub async fn add_comment(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let comment = service(&state).add_comment(&actor, id, &req.message).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
