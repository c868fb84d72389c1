pub mod alerts;
pub mod dashboard;
pub mod health;
pub mod suggestions;

use std::sync::Arc;

use crate::config::ForecastConfig;
use crate::providers::BillingDataSource;
use crate::registry::AlertRegistry;

/// Shared application state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub billing: Arc<dyn BillingDataSource>,
    pub registry: Arc<AlertRegistry>,
    pub forecast: ForecastConfig,
}
