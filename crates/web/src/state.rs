use std::sync::Arc;

use storage::Database;
use storage::services::analytics::AnalyticsEngine;

use crate::config::Config;
use crate::features::billing::BillingService;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub analytics: AnalyticsEngine,
    pub billing: BillingService,
}
