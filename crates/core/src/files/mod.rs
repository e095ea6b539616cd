//! Lazy per-card file listing resolution.
//!
//! File data is best-effort: the index is asked first, the peer network
//! second, and a synthetic single-entry listing stands in when both come
//! up empty. Nothing in this module ever surfaces an error to the caller.

mod magnet_fetcher;
mod resolver;

pub use magnet_fetcher::MagnetMetadataFetcher;
pub use resolver::{FileResolution, FileResolver, ResolutionTier};

use async_trait::async_trait;
use thiserror::Error;

use crate::results::TorrentFile;

/// Errors from peer-network metadata resolution.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Peer session error: {0}")]
    Session(String),

    #[error("Invalid magnet URI: {0}")]
    InvalidMagnet(String),

    #[error("No metadata received")]
    NoMetadata,
}

/// Fetches a torrent's file manifest directly from the peer network.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Resolve a magnet URI to its file manifest.
    async fn fetch(&self, magnet_uri: &str) -> Result<Vec<TorrentFile>, MetadataError>;
}
