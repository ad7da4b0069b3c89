use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::project::{Comment, Project, ProjectStatus};
use crate::domain::repositories::{ProjectFilter, ProjectRepository};
use crate::domain::user::Role;

/// PostgreSQL implementation of ProjectRepository
///
/// Comments live in their own table keyed by project id, read back in
/// `created_at` order. Scalar updates are single-row statements and a
/// comment append runs in one transaction (insert + touch), so the two
/// write paths serialize on the project row without clobbering each
/// other.
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new PostgresProjectRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads the comment threads for a set of projects in one query
    async fn threads_for(&self, ids: &[Uuid]) -> DomainResult<HashMap<Uuid, Vec<Comment>>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, project_id, user_id, user_name, user_role, message, created_at
            FROM comments
            WHERE project_id = ANY($1)
            ORDER BY created_at, id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        let mut threads: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for row in rows {
            let comment = row.into_domain()?;
            threads.entry(comment.project_id).or_default().push(comment);
        }
        Ok(threads)
    }

    async fn assemble(&self, rows: Vec<ProjectRow>) -> DomainResult<Vec<Project>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut threads = self.threads_for(&ids).await?;
        rows.into_iter()
            .map(|row| {
                let comments = threads.remove(&row.id).unwrap_or_default();
                row.into_domain(comments)
            })
            .collect()
    }
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    title: String,
    description: String,
    category: String,
    images: Vec<String>,
    status: String,
    client_id: Uuid,
    client_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    budget: Option<Decimal>,
    deadline: Option<NaiveDate>,
}

impl ProjectRow {
    fn into_domain(self, comments: Vec<Comment>) -> DomainResult<Project> {
        let status: ProjectStatus = self.status.parse().map_err(DomainError::Storage)?;
        Ok(Project::from_persistence(
            self.id,
            self.title,
            self.description,
            self.category,
            self.images,
            status,
            self.client_id,
            self.client_name,
            self.created_at,
            self.updated_at,
            self.budget,
            self.deadline,
            comments,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    project_id: Uuid,
    user_id: Uuid,
    user_name: String,
    user_role: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_domain(self) -> DomainResult<Comment> {
        let user_role: Role = self.user_role.parse().map_err(DomainError::Storage)?;
        Ok(Comment {
            id: self.id,
            project_id: self.project_id,
            user_id: self.user_id,
            user_name: self.user_name,
            user_role,
            message: self.message,
            created_at: self.created_at,
        })
    }
}

fn storage(e: sqlx::Error) -> DomainError {
    DomainError::Storage(e.to_string())
}

const SELECT_PROJECT: &str = r#"
    SELECT id, title, description, category, images, status, client_id,
           client_name, created_at, updated_at, budget, deadline
    FROM projects
"#;

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn create(&self, project: &Project) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO projects (
                id, title, description, category, images, status, client_id,
                client_name, created_at, updated_at, budget, deadline
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(project.id())
        .bind(project.title())
        .bind(project.description())
        .bind(project.category())
        .bind(project.images())
        .bind(project.status().as_str())
        .bind(project.client_id())
        .bind(project.client_name())
        .bind(project.created_at())
        .bind(project.updated_at())
        .bind(project.budget())
        .bind(project.deadline())
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        Ok(())
    }

    async fn update(&self, project: &Project) -> DomainResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE projects SET
                title = $2, description = $3, category = $4, images = $5,
                status = $6, client_name = $7, budget = $8, deadline = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(project.id())
        .bind(project.title())
        .bind(project.description())
        .bind(project.category())
        .bind(project.images())
        .bind(project.status().as_str())
        .bind(project.client_name())
        .bind(project.budget())
        .bind(project.deadline())
        .bind(project.updated_at())
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ProjectNotFound(project.id()));
        }
        Ok(())
    }

    async fn append_comment(
        &self,
        project_id: Uuid,
        comment: &Comment,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let touched = sqlx::query("UPDATE projects SET updated_at = $2 WHERE id = $1")
            .bind(project_id)
            .bind(updated_at)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;
        if touched.rows_affected() == 0 {
            return Err(DomainError::ProjectNotFound(project_id));
        }

        sqlx::query(
            r#"
            INSERT INTO comments (
                id, project_id, user_id, user_name, user_role, message, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(comment.id)
        .bind(comment.project_id)
        .bind(comment.user_id)
        .bind(comment.user_name.as_str())
        .bind(comment.user_role.as_str())
        .bind(comment.message.as_str())
        .bind(comment.created_at)
        .execute(&mut *tx)
        .await
        .map_err(storage)?;

        tx.commit().await.map_err(storage)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!("{SELECT_PROJECT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;

        let Some(row) = row else { return Ok(None) };
        let mut assembled = self.assemble(vec![row]).await?;
        Ok(assembled.pop())
    }

    async fn list_for_client(&self, client_id: Uuid) -> DomainResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "{SELECT_PROJECT} WHERE client_id = $1 ORDER BY created_at, id"
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        self.assemble(rows).await
    }

    async fn list_all(&self, filter: &ProjectFilter) -> DomainResult<Vec<Project>> {
        let status = filter.status.map(|s| s.as_str().to_string());
        let pattern = filter.search.as_ref().map(|s| format!("%{}%", s));

        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            {SELECT_PROJECT}
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR title ILIKE $2 OR client_name ILIKE $2)
            ORDER BY created_at, id
            "#
        ))
        .bind(status)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        self.assemble(rows).await
    }
}
