//! Shared application state

use crate::orchestrator::Orchestrator;
use std::sync::Arc;
use stockchat_market::ChartStore;

/// State handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub charts: ChartStore,
}

impl AppState {
    /// Build application state
    pub fn new(orchestrator: Arc<Orchestrator>, charts: ChartStore) -> Self {
        Self {
            orchestrator,
            charts,
        }
    }
}
