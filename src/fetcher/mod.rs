pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;

/// Transport capability: retrieve the raw document behind a feed URL.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
