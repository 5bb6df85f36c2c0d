//! HTTP handlers
//!
//! All handlers are public (no authentication). Each lookup is stateless and
//! shares only the read-only `AppState`.

pub mod legal;
pub mod ping;
pub mod portfolio;

use std::sync::Arc;

use crate::services::PortfolioService;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub portfolio: Arc<PortfolioService>,
}

impl AppState {
    pub fn new(portfolio: PortfolioService) -> Self {
        Self { portfolio: Arc::new(portfolio) }
    }
}
