//! Fan-out over the configured feed sources, merged into one sorted collection.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use url::Url;

use crate::app::Result;
use crate::domain::{NewsCollection, NewsItem};
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;

pub const DEFAULT_WORKERS: usize = 8;

/// Ordered list of feed URLs, fixed for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSources {
    urls: Vec<String>,
}

impl FeedSources {
    /// Keeps the URLs that parse, in order; the rest are logged and dropped.
    pub fn from_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls = urls
            .into_iter()
            .filter_map(|url| {
                let url = url.as_ref().trim();
                match Url::parse(url) {
                    Ok(_) => Some(url.to_string()),
                    Err(e) => {
                        tracing::warn!("Ignoring invalid feed URL {:?}: {}", url, e);
                        None
                    }
                }
            })
            .collect();

        Self { urls }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }
}

pub struct Aggregator {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
    sources: FeedSources,
    semaphore: Arc<Semaphore>,
}

impl Aggregator {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, sources: FeedSources) -> Self {
        Self::with_workers(fetcher, sources, DEFAULT_WORKERS)
    }

    pub fn with_workers(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        sources: FeedSources,
        workers: usize,
    ) -> Self {
        Self {
            fetcher,
            normalizer: Normalizer::new(),
            sources,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    pub fn sources(&self) -> &FeedSources {
        &self.sources
    }

    /// Fetch every source and merge the entries, sorted by title.
    ///
    /// A source that fails to fetch or parse is skipped; the result is empty
    /// when every source fails. Never returns an error.
    pub async fn aggregate(&self) -> NewsCollection {
        let handles: Vec<_> = self
            .sources
            .iter()
            .map(|url| {
                let url = url.to_string();
                let fetcher = self.fetcher.clone();
                let normalizer = self.normalizer.clone();
                let semaphore = self.semaphore.clone();

                tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.ok();
                    let result = fetch_source(fetcher.as_ref(), &normalizer, &url).await;
                    (url, result)
                })
            })
            .collect();

        let mut items = Vec::new();
        let mut failed = 0;

        // Handles are joined in source order so equal titles stay stable.
        for joined in join_all(handles).await {
            match joined {
                Ok((url, Ok(source_items))) => {
                    tracing::debug!("Fetched {} items from {}", source_items.len(), url);
                    items.extend(source_items);
                }
                Ok((url, Err(e))) => {
                    failed += 1;
                    tracing::warn!("Skipping feed {}: {}", url, e);
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!("Feed task join error: {}", e);
                }
            }
        }

        tracing::info!(
            "Aggregated {} items from {} sources ({} failed)",
            items.len(),
            self.sources.len(),
            failed
        );

        NewsCollection::new(items)
    }
}

async fn fetch_source(
    fetcher: &(dyn Fetcher + Send + Sync),
    normalizer: &Normalizer,
    url: &str,
) -> Result<Vec<NewsItem>> {
    let body = fetcher.fetch(url).await?;
    let feed = normalizer.parse(&body)?;
    Ok(normalizer.normalize(url, &feed))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::app::TickerError;

    struct FailingFetcher;

    #[async_trait]
    impl Fetcher for FailingFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            Err(TickerError::Other(format!("connection refused: {}", url)))
        }
    }

    struct PanickingFetcher;

    #[async_trait]
    impl Fetcher for PanickingFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            panic!("transport blew up");
        }
    }

    /// Serves canned bodies; unknown URLs fail.
    struct CannedFetcher {
        bodies: HashMap<String, String>,
    }

    #[async_trait]
    impl Fetcher for CannedFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.bodies
                .get(url)
                .map(|b| b.as_bytes().to_vec())
                .ok_or_else(|| TickerError::Other(format!("404: {}", url)))
        }
    }

    fn rss(channel_title: &str, titles: &[&str]) -> String {
        let items: String = titles
            .iter()
            .map(|t| {
                format!(
                    "<item><title>{t}</title><link>https://example.com/{t}</link>\
                     <description>About {t}</description></item>"
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0"?><rss version="2.0"><channel><title>{channel_title}</title>{items}</channel></rss>"#
        )
    }

    fn sources(urls: &[&str]) -> FeedSources {
        FeedSources::from_urls(urls.iter().copied())
    }

    #[test]
    fn test_feed_sources_drop_invalid_urls() {
        let sources = sources(&["https://a.example/rss", "not a url", " https://b.example/rss "]);
        let urls: Vec<_> = sources.iter().collect();
        assert_eq!(urls, vec!["https://a.example/rss", "https://b.example/rss"]);
    }

    #[tokio::test]
    async fn test_all_sources_fail_returns_empty() {
        let aggregator = Aggregator::new(
            Arc::new(FailingFetcher),
            sources(&["https://a.example/rss", "https://b.example/rss"]),
        );
        assert!(aggregator.aggregate().await.is_empty());
    }

    #[tokio::test]
    async fn test_panicking_source_is_skipped() {
        let aggregator = Aggregator::new(
            Arc::new(PanickingFetcher),
            sources(&["https://a.example/rss"]),
        );
        assert!(aggregator.aggregate().await.is_empty());
    }

    #[tokio::test]
    async fn test_no_sources_returns_empty() {
        let aggregator = Aggregator::new(Arc::new(FailingFetcher), FeedSources::default());
        assert!(aggregator.aggregate().await.is_empty());
    }

    #[tokio::test]
    async fn test_bad_source_does_not_abort_run() {
        let mut bodies = HashMap::new();
        bodies.insert("https://good.example/rss".to_string(), rss("Good", &["Zeta", "Alpha"]));
        bodies.insert("https://broken.example/rss".to_string(), "<html>oops".to_string());

        let aggregator = Aggregator::with_workers(
            Arc::new(CannedFetcher { bodies }),
            sources(&[
                "https://broken.example/rss",
                "https://missing.example/rss",
                "https://good.example/rss",
            ]),
            2,
        );

        let collection = aggregator.aggregate().await;
        let titles: Vec<_> = collection.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Zeta"]);
        assert!(collection.iter().all(|i| i.source == "Good"));
    }

    #[tokio::test]
    async fn test_result_sorted_across_sources() {
        let mut bodies = HashMap::new();
        bodies.insert("https://one.example/rss".to_string(), rss("One", &["Mango", "Banana"]));
        bodies.insert("https://two.example/rss".to_string(), rss("Two", &["Cherry", "Apple"]));

        let aggregator = Aggregator::new(
            Arc::new(CannedFetcher { bodies }),
            sources(&["https://one.example/rss", "https://two.example/rss"]),
        );

        let collection = aggregator.aggregate().await;
        let titles: Vec<_> = collection.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "Banana", "Cherry", "Mango"]);

        let apple = collection.get(0).unwrap();
        assert_eq!(apple.source, "Two");
        assert_eq!(apple.summary, "About Apple");
        assert_eq!(apple.link, "https://example.com/Apple");
    }

    #[test]
    fn test_aggregate_blocking() {
        let aggregator = Aggregator::new(Arc::new(FailingFetcher), sources(&["https://a.example/rss"]));
        let collection = tokio_test::block_on(aggregator.aggregate());
        assert_eq!(collection.len(), 0);
    }
}
