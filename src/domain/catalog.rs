//! Public landing-page content: the portfolio and the service catalog
//!
//! Read-only data maintained out of band; the portal only lists it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A showcased piece of past work
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub image: String,
    pub description: String,
    /// Featured items are pinned to the top of the landing page.
    pub featured: bool,
}

/// A service the agency offers, with an optional starting price label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Icon name resolved by the frontend's icon set.
    pub icon: String,
    pub price: Option<String>,
}
