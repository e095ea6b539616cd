//! Types for the index backend contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::results::{SearchHit, TorrentFile};

/// A single page request against the index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    /// Wildcard-broadened query string.
    pub query_string: String,
    /// Maximum results for this page.
    pub limit: u32,
    /// Offset into the result stream, `(page - 1) * limit`.
    pub offset: u32,
}

/// One fetched page, before any client-side filtering.
#[derive(Debug, Clone)]
pub struct SearchPage {
    /// Items in the order the index returned them (its relevance order).
    pub hits: Vec<SearchHit>,
    /// How long the index call took in milliseconds.
    pub duration_ms: u64,
}

/// Errors that can occur talking to the index.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Index connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Index returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Index error: {0}")]
    Api(String),

    #[error("Malformed index response: {0}")]
    Decode(String),

    #[error("Request timeout")]
    Timeout,
}

/// Trait for torrent index backends.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Fetch one page of search results.
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, BackendError>;

    /// Look up the file listing indexed for a content hash.
    ///
    /// `Ok(None)` means the index knows nothing about the files yet;
    /// an empty indexed list is reported the same way.
    async fn files(&self, info_hash: &str) -> Result<Option<Vec<TorrentFile>>, BackendError>;
}
