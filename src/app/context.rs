use std::path::PathBuf;
use std::sync::Arc;

use crate::aggregator::{Aggregator, FeedSources};
use crate::app::Result;
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::store::{JsonPositionStore, MemoryPositionStore, PositionStore};

/// Wires configuration, fetching and persistence together for one run.
pub struct AppContext {
    pub config: Config,
    pub aggregator: Aggregator,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::with_options(
            config.fetch.timeout(),
            &config.fetch.user_agent,
        )?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let sources = FeedSources::from_urls(&config.feeds);
        let aggregator = Aggregator::with_workers(fetcher, sources, config.fetch.workers);
        Self { config, aggregator }
    }

    /// Configured override, else the per-user default location.
    pub fn position_file(&self) -> Option<PathBuf> {
        self.config
            .overlay
            .position_file
            .clone()
            .or_else(JsonPositionStore::default_path)
    }

    /// File-backed store, or an in-memory one when there is nowhere to write.
    pub fn position_store(&self) -> Box<dyn PositionStore + Send> {
        let margins = self.config.overlay.margins();
        match self.position_file() {
            Some(path) => Box::new(JsonPositionStore::new(path, margins)),
            None => {
                tracing::warn!("No config directory; window position will not be remembered");
                Box::new(MemoryPositionStore::new(margins))
            }
        }
    }
}
