//! Mock index backend for testing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::backend::{BackendError, SearchBackend, SearchPage, SearchRequest};
use crate::results::{SearchHit, TorrentFile};

/// Mock implementation of the `SearchBackend` trait.
///
/// Holds a full result corpus and serves `limit`/`offset` windows of it,
/// so pagination behaves like a real index. Provides controllable
/// behavior for testing:
/// - Record every search request for assertions
/// - Inject a one-shot error
/// - Delay the next search (for supersession tests)
/// - Script per-hash file listings and count file lookups
#[derive(Default)]
pub struct MockSearchBackend {
    /// Full corpus; searches return windows of it.
    hits: Arc<RwLock<Vec<SearchHit>>>,
    /// Recorded search requests.
    requests: Arc<RwLock<Vec<SearchRequest>>>,
    /// If set, the next search fails with this error.
    next_error: Arc<RwLock<Option<BackendError>>>,
    /// If set, the next search sleeps this long before responding.
    next_delay: Arc<RwLock<Option<Duration>>>,
    /// Scripted file listings by info hash.
    files: Arc<RwLock<HashMap<String, Vec<TorrentFile>>>>,
    /// If set, the next files lookup fails with this error.
    next_files_error: Arc<RwLock<Option<BackendError>>>,
    /// File lookups performed, by info hash.
    files_calls: Arc<RwLock<HashMap<String, u32>>>,
}

impl MockSearchBackend {
    /// Create a new mock backend with an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the result corpus.
    pub async fn set_hits(&self, hits: Vec<SearchHit>) {
        *self.hits.write().await = hits;
    }

    /// Get recorded search requests.
    pub async fn recorded_requests(&self) -> Vec<SearchRequest> {
        self.requests.read().await.clone()
    }

    /// Get the number of searches performed.
    pub async fn search_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: BackendError) {
        *self.next_error.write().await = Some(error);
    }

    /// Configure the next search to sleep before responding.
    pub async fn set_next_delay(&self, delay: Duration) {
        *self.next_delay.write().await = Some(delay);
    }

    /// Script the file listing for an info hash.
    pub async fn set_files(&self, info_hash: &str, files: Vec<TorrentFile>) {
        self.files
            .write()
            .await
            .insert(info_hash.to_lowercase(), files);
    }

    /// Configure the next files lookup to fail with the given error.
    pub async fn set_next_files_error(&self, error: BackendError) {
        *self.next_files_error.write().await = Some(error);
    }

    /// How many file lookups were performed for an info hash.
    pub async fn files_call_count(&self, info_hash: &str) -> u32 {
        self.files_calls
            .read()
            .await
            .get(&info_hash.to_lowercase())
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl SearchBackend for MockSearchBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, BackendError> {
        self.requests.write().await.push(request.clone());

        if let Some(delay) = self.next_delay.write().await.take() {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        let all = self.hits.read().await;
        let start = (request.offset as usize).min(all.len());
        let end = (start + request.limit as usize).min(all.len());
        let hits = all[start..end].to_vec();

        Ok(SearchPage {
            hits,
            duration_ms: 5,
        })
    }

    async fn files(&self, info_hash: &str) -> Result<Option<Vec<TorrentFile>>, BackendError> {
        let key = info_hash.to_lowercase();
        *self.files_calls.write().await.entry(key.clone()).or_insert(0) += 1;

        if let Some(err) = self.next_files_error.write().await.take() {
            return Err(err);
        }

        Ok(self
            .files
            .read()
            .await
            .get(&key)
            .cloned()
            .filter(|files| !files.is_empty()))
    }
}
