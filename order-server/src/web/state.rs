//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedGeocoder;
use crate::otp::OtpClient;
use crate::planner::Optimizer;

/// The optimizer as wired up for production.
pub type AppOptimizer = Optimizer<CachedGeocoder, OtpClient>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub optimizer: Arc<AppOptimizer>,
}

impl AppState {
    pub fn new(optimizer: AppOptimizer) -> Self {
        Self {
            optimizer: Arc::new(optimizer),
        }
    }
}
