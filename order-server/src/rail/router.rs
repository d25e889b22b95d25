//! Process-wide holder for the lazily built rail graph.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::feed::{FeedError, FeedTables};

use super::config::RailConfig;
use super::graph::RailGraph;

/// Owns the rail graph for the lifetime of the process.
///
/// The graph is built on first use. Concurrent first callers share one
/// load; a failed load leaves the holder empty so a later call retries.
pub struct RailRouter {
    config: RailConfig,
    graph: OnceCell<Arc<RailGraph>>,
}

impl RailRouter {
    pub fn new(config: RailConfig) -> Self {
        Self {
            config,
            graph: OnceCell::new(),
        }
    }

    /// A router around an already built graph.
    pub fn with_graph(config: RailConfig, graph: RailGraph) -> Self {
        Self {
            config,
            graph: OnceCell::new_with(Some(Arc::new(graph))),
        }
    }

    pub fn config(&self) -> &RailConfig {
        &self.config
    }

    /// Whether the graph has been built.
    pub fn is_loaded(&self) -> bool {
        self.graph.initialized()
    }

    /// Get the graph, building it if this is the first call.
    pub async fn graph(&self) -> Result<Arc<RailGraph>, FeedError> {
        self.graph
            .get_or_try_init(|| async {
                let source = self.config.feed.as_ref().ok_or(FeedError::NotConfigured)?;
                info!(?source, "loading rail feed");
                let tables = FeedTables::load(source, self.config.fetch_timeout_secs).await?;
                Ok(Arc::new(RailGraph::build(&tables, &self.config)))
            })
            .await
            .cloned()
    }

    /// Build the graph now if configured to preload. Failures are logged;
    /// requests will retry on demand.
    pub async fn preload(&self) {
        if !self.config.preload {
            return;
        }
        if let Err(e) = self.graph().await {
            warn!(error = %e, "rail graph preload failed");
        }
    }
}
