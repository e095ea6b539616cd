//! Peer-network metadata fetch via an embedded librqbit session.

use std::sync::Arc;

use async_trait::async_trait;
use librqbit::{AddTorrent, AddTorrentOptions, AddTorrentResponse, Session, SessionOptions};
use tracing::{debug, info, warn};

use crate::config::MetadataConfig;
use crate::results::TorrentFile;

use super::{MetadataError, MetadataFetcher};

/// Fetches torrent metadata from peers without downloading any content.
///
/// Runs magnets through a list-only librqbit session: the metadata is
/// resolved via DHT and peer exchange, the file manifest extracted, and
/// nothing is written beyond the session's scratch state.
pub struct MagnetMetadataFetcher {
    session: Arc<Session>,
}

impl MagnetMetadataFetcher {
    /// Create a new fetcher with its own librqbit session.
    pub async fn new(config: &MetadataConfig) -> Result<Self, MetadataError> {
        let session_dir = config.session_dir.clone();
        if !session_dir.exists() {
            std::fs::create_dir_all(&session_dir).map_err(|e| {
                MetadataError::Session(format!("Failed to create session directory: {}", e))
            })?;
        }

        info!(
            session_dir = %session_dir.display(),
            "Initializing peer metadata session"
        );

        let session = Session::new_with_opts(session_dir, SessionOptions::default())
            .await
            .map_err(|e| {
                MetadataError::Session(format!("Failed to initialize librqbit session: {}", e))
            })?;

        Ok(Self { session })
    }
}

#[async_trait]
impl MetadataFetcher for MagnetMetadataFetcher {
    fn name(&self) -> &str {
        "librqbit"
    }

    async fn fetch(&self, magnet_uri: &str) -> Result<Vec<TorrentFile>, MetadataError> {
        if !magnet_uri.starts_with("magnet:") {
            return Err(MetadataError::InvalidMagnet(magnet_uri.to_string()));
        }

        debug!(magnet = %magnet_uri, "Fetching metadata from peers");

        let response = self
            .session
            .add_torrent(
                AddTorrent::from_url(magnet_uri),
                Some(AddTorrentOptions {
                    list_only: true,
                    ..Default::default()
                }),
            )
            .await
            .map_err(|e| MetadataError::Session(format!("Failed to resolve magnet: {}", e)))?;

        match response {
            AddTorrentResponse::ListOnly(listing) => {
                let iter = listing
                    .info
                    .iter_file_details()
                    .map_err(|e| MetadataError::Session(format!("Unreadable metadata: {}", e)))?;

                let mut files = Vec::new();
                for detail in iter {
                    let components = detail.filename.to_vec().map_err(|e| {
                        MetadataError::Session(format!("Unreadable file path: {}", e))
                    })?;
                    files.push(TorrentFile {
                        path: components.join("/"),
                        size_bytes: Some(detail.len),
                    });
                }

                debug!(files = files.len(), "Peer metadata received");
                Ok(files)
            }
            AddTorrentResponse::Added(id, _) | AddTorrentResponse::AlreadyManaged(id, _) => {
                // list_only must not start the torrent; if the session did
                // anyway, drop it again and report no data.
                warn!(magnet = %magnet_uri, "Metadata fetch unexpectedly added a torrent, removing");
                let _ = self.session.delete(id.into(), true).await;
                Err(MetadataError::NoMetadata)
            }
        }
    }
}
