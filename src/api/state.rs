use std::sync::Arc;

use crate::config::Config;
use crate::services::{ActivityClient, RecommendationEngine, RecommendationSettings};

/// Shared application state
///
/// Holds no per-request data; every aggregation owns its own working set.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn ActivityClient>,
    pub engine: RecommendationEngine,
    /// Listing size for the author passthrough endpoint
    pub sample_size: u32,
    pub search_limit: u32,
}

impl AppState {
    pub fn new(client: Arc<dyn ActivityClient>, config: &Config) -> Self {
        let engine = RecommendationEngine::new(
            Arc::clone(&client),
            RecommendationSettings::from(config),
        );

        Self {
            client,
            engine,
            sample_size: config.sample_size,
            search_limit: config.search_limit,
        }
    }
}
