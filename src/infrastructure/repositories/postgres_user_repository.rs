use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::UserRepository;
use crate::domain::user::{Email, Role, User};

/// PostgreSQL implementation of UserRepository
///
/// The users table carries a unique index on email; a violation there
/// surfaces as `DuplicateEmail` so the registration race resolves the
/// same way as the service-level pre-check.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    company: Option<String>,
    avatar: Option<String>,
}

impl UserRow {
    fn into_domain(self) -> DomainResult<User> {
        let email = Email::new(&self.email).map_err(DomainError::Storage)?;
        let role: Role = self.role.parse().map_err(DomainError::Storage)?;
        Ok(User {
            id: self.id,
            name: self.name,
            email,
            password_hash: self.password_hash,
            role,
            company: self.company,
            avatar: self.avatar,
        })
    }
}

fn storage(e: sqlx::Error) -> DomainError {
    DomainError::Storage(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, company, avatar)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.company)
        .bind(&user.avatar)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::DuplicateEmail,
            _ => storage(e),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, role, company, avatar
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.map(UserRow::into_domain).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, role, company, avatar
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.map(UserRow::into_domain).transpose()
    }
}
