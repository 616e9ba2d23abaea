pub mod api;
pub mod config;
pub mod error;
pub mod graph;
pub mod relay;

pub use config::Config;
pub use error::RelayError;

use std::sync::Arc;

use graph::{GraphApi, GraphClient};

/// Shared application state passed to all API handlers.
pub struct AppState {
    pub config: Config,
    pub graph: Box<dyn GraphApi>,
}

impl AppState {
    /// State backed by a real Graph API client built from `config`.
    pub fn new(config: Config) -> Self {
        let graph = GraphClient::with_base_url(
            config.graph_base_url.clone(),
            config.api_version.clone(),
        );
        Self {
            config,
            graph: Box::new(graph),
        }
    }
}

pub type SharedState = Arc<AppState>;
