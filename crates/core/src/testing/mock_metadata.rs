//! Mock peer-network metadata fetcher for testing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::files::{MetadataError, MetadataFetcher};
use crate::results::TorrentFile;

/// Mock implementation of the `MetadataFetcher` trait.
///
/// Provides controllable behavior for testing the fallback tier:
/// - Return configurable file manifests
/// - Simulate failures and slow peers
/// - Record fetched magnet URIs
#[derive(Default)]
pub struct MockMetadataFetcher {
    files: Arc<RwLock<Vec<TorrentFile>>>,
    /// If set, every fetch fails with an error.
    failing: Arc<RwLock<bool>>,
    /// If set, fetches sleep this long before responding.
    delay: Arc<RwLock<Option<Duration>>>,
    /// Recorded magnet URIs.
    fetched: Arc<RwLock<Vec<String>>>,
}

impl MockMetadataFetcher {
    /// Create a new mock fetcher returning an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the manifest returned by subsequent fetches.
    pub async fn set_files(&self, files: Vec<TorrentFile>) {
        *self.files.write().await = files;
    }

    /// Make every fetch fail.
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }

    /// Make fetches sleep before responding, to simulate slow peers.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Magnet URIs fetched so far.
    pub async fn fetched_magnets(&self) -> Vec<String> {
        self.fetched.read().await.clone()
    }

    /// How many fetches were issued.
    pub async fn fetch_count(&self) -> usize {
        self.fetched.read().await.len()
    }
}

#[async_trait]
impl MetadataFetcher for MockMetadataFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, magnet_uri: &str) -> Result<Vec<TorrentFile>, MetadataError> {
        self.fetched.write().await.push(magnet_uri.to_string());

        if let Some(delay) = *self.delay.read().await {
            tokio::time::sleep(delay).await;
        }

        if *self.failing.read().await {
            return Err(MetadataError::NoMetadata);
        }

        Ok(self.files.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_returns_configured_files() {
        let fetcher = MockMetadataFetcher::new();
        fetcher.set_files(vec![fixtures::file("a.mkv", 10)]).await;

        let files = fetcher.fetch("magnet:?xt=urn:btih:abc").await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(fetcher.fetch_count().await, 1);
        assert_eq!(
            fetcher.fetched_magnets().await,
            vec!["magnet:?xt=urn:btih:abc"]
        );
    }

    #[tokio::test]
    async fn test_failing() {
        let fetcher = MockMetadataFetcher::new();
        fetcher.set_failing(true).await;
        assert!(fetcher.fetch("magnet:?xt=urn:btih:abc").await.is_err());
    }
}
