use axum::{extract::State, Json};

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::domain::catalog::{PortfolioItem, Service};

/// Landing page portfolio, featured work first
///
/// GET /api/portfolio
pub async fn list_portfolio(
    State(state): State<AppState>,
) -> Result<Json<Vec<PortfolioItem>>, ApiError> {
    let items = state.catalog.list_portfolio().await?;
    Ok(Json(items))
}

/// Offered services
///
/// GET /api/services
pub async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<Service>>, ApiError> {
    let services = state.catalog.list_services().await?;
    Ok(Json(services))
}
