use async_trait::async_trait;

use crate::domain::catalog::{PortfolioItem, Service};
use crate::domain::errors::DomainResult;

/// Repository trait for the public landing-page catalogs
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All portfolio pieces, featured entries first
    async fn list_portfolio(&self) -> DomainResult<Vec<PortfolioItem>>;

    /// All offered services, in display order
    async fn list_services(&self) -> DomainResult<Vec<Service>>;
}
