use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{PortfolioItem, Service};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::CatalogRepository;

/// PostgreSQL implementation of CatalogRepository
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PortfolioRow {
    id: Uuid,
    title: String,
    category: String,
    image: String,
    description: String,
    featured: bool,
}

#[derive(sqlx::FromRow)]
struct ServiceRow {
    id: Uuid,
    name: String,
    description: String,
    icon: String,
    price: Option<String>,
}

fn storage(e: sqlx::Error) -> DomainError {
    DomainError::Storage(e.to_string())
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn list_portfolio(&self) -> DomainResult<Vec<PortfolioItem>> {
        let rows = sqlx::query_as::<_, PortfolioRow>(
            r#"
            SELECT id, title, category, image, description, featured
            FROM portfolio_items
            ORDER BY featured DESC, display_order
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .into_iter()
            .map(|r| PortfolioItem {
                id: r.id,
                title: r.title,
                category: r.category,
                image: r.image,
                description: r.description,
                featured: r.featured,
            })
            .collect())
    }

    async fn list_services(&self) -> DomainResult<Vec<Service>> {
        let rows = sqlx::query_as::<_, ServiceRow>(
            r#"
            SELECT id, name, description, icon, price
            FROM services
            ORDER BY display_order
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .into_iter()
            .map(|r| Service {
                id: r.id,
                name: r.name,
                description: r.description,
                icon: r.icon,
                price: r.price,
            })
            .collect())
    }
}
