//! Two-tier file listing resolution with per-card memoization.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::backend::SearchBackend;
use crate::metrics;
use crate::results::{SearchHit, TorrentFile};

use super::MetadataFetcher;

/// How a file listing was obtained.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionTier {
    /// The index had the file list.
    Indexed,
    /// Fetched from peers via the magnet URI.
    PeerNetwork,
    /// Neither tier produced data; a synthetic single entry stands in.
    Unavailable,
}

impl ResolutionTier {
    pub fn as_label(self) -> &'static str {
        match self {
            ResolutionTier::Indexed => "indexed",
            ResolutionTier::PeerNetwork => "peer_network",
            ResolutionTier::Unavailable => "unavailable",
        }
    }
}

/// A resolved file listing and the tier that produced it.
///
/// `files` is never empty and always sorted lexicographically by path.
#[derive(Debug, Clone, Serialize)]
pub struct FileResolution {
    pub tier: ResolutionTier,
    pub files: Vec<TorrentFile>,
}

/// Resolves file listings lazily, at most once per displayed card.
///
/// An index miss or failure falls back to the peer network, bounded by a
/// deadline; a peer-network miss falls back to a single synthetic entry
/// named after the card. Results are memoized by info hash, so repeated
/// expansion of the same card after the first resolution completes never
/// issues another fetch.
pub struct FileResolver {
    backend: Arc<dyn SearchBackend>,
    fetcher: Option<Arc<dyn MetadataFetcher>>,
    fallback_timeout: Duration,
    cache: Mutex<HashMap<String, Arc<FileResolution>>>,
}

impl FileResolver {
    /// Create a resolver. `fetcher` is the optional peer-network
    /// capability; without it, index misses go straight to the synthetic
    /// fallback.
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        fetcher: Option<Arc<dyn MetadataFetcher>>,
        fallback_timeout: Duration,
    ) -> Self {
        Self {
            backend,
            fetcher,
            fallback_timeout,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the file listing for a displayed card. Never fails.
    pub async fn resolve(&self, hit: &SearchHit) -> Arc<FileResolution> {
        let key = hit.info_hash.to_lowercase();

        if let Some(cached) = self.cache.lock().await.get(&key) {
            return Arc::clone(cached);
        }

        let resolution = Arc::new(self.resolve_uncached(hit).await);
        metrics::FILE_RESOLUTIONS
            .with_label_values(&[resolution.tier.as_label()])
            .inc();
        self.cache
            .lock()
            .await
            .insert(key, Arc::clone(&resolution));
        resolution
    }

    async fn resolve_uncached(&self, hit: &SearchHit) -> FileResolution {
        // Tier 1: the index.
        match self.backend.files(&hit.info_hash).await {
            Ok(Some(files)) if !files.is_empty() => {
                debug!(
                    info_hash = %hit.info_hash,
                    files = files.len(),
                    "File listing from index"
                );
                return FileResolution {
                    tier: ResolutionTier::Indexed,
                    files: sorted_by_path(files),
                };
            }
            Ok(_) => {
                debug!(info_hash = %hit.info_hash, "Index has no file data");
            }
            Err(e) => {
                warn!(info_hash = %hit.info_hash, error = %e, "Index file lookup failed");
            }
        }

        // Tier 2: the peer network, with a hard deadline. A fetch that
        // outlives the deadline is dropped, not awaited further.
        if let Some(fetcher) = &self.fetcher {
            match tokio::time::timeout(self.fallback_timeout, fetcher.fetch(&hit.magnet_uri)).await
            {
                Ok(Ok(files)) if !files.is_empty() => {
                    debug!(
                        info_hash = %hit.info_hash,
                        files = files.len(),
                        "File listing from peers"
                    );
                    return FileResolution {
                        tier: ResolutionTier::PeerNetwork,
                        files: sorted_by_path(files),
                    };
                }
                Ok(Ok(_)) => {
                    debug!(info_hash = %hit.info_hash, "Peers returned an empty file list");
                }
                Ok(Err(e)) => {
                    warn!(info_hash = %hit.info_hash, error = %e, "Peer metadata fetch failed");
                }
                Err(_) => {
                    warn!(
                        info_hash = %hit.info_hash,
                        timeout_secs = self.fallback_timeout.as_secs(),
                        "Peer metadata fetch timed out"
                    );
                }
            }
        }

        // Tier 3: represent the torrent as one undifferentiated entry.
        FileResolution {
            tier: ResolutionTier::Unavailable,
            files: vec![TorrentFile {
                path: hit.display_title().to_string(),
                size_bytes: None,
            }],
        }
    }
}

fn sorted_by_path(mut files: Vec<TorrentFile>) -> Vec<TorrentFile> {
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}
