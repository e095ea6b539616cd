//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides mock implementations of the external service
//! traits (index backend, peer metadata fetcher), allowing the whole
//! pipeline to be exercised without real infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use maglens_core::testing::{fixtures, MockSearchBackend};
//!
//! let backend = MockSearchBackend::new();
//! backend.set_hits(vec![
//!     fixtures::hit("The Matrix (1999)", "hash1"),
//!     fixtures::hit("The Matrix Reloaded", "hash2"),
//! ]).await;
//!
//! // Use in a SessionController...
//! ```

mod mock_backend;
mod mock_metadata;

pub use mock_backend::MockSearchBackend;
pub use mock_metadata::MockMetadataFetcher;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::backend::synthesize_magnet;
    use crate::results::{ContentType, SearchHit, TorrentFile};

    /// Create a test search hit with reasonable defaults.
    pub fn hit(title: &str, info_hash: &str) -> SearchHit {
        SearchHit {
            info_hash: info_hash.to_string(),
            title: title.to_string(),
            content_type: None,
            seeders: 10,
            leechers: 2,
            published_at: None,
            torrent_name: None,
            size_bytes: 1024 * 1024 * 100, // 100 MB
            magnet_uri: synthesize_magnet(info_hash, title),
        }
    }

    /// Create a test hit with a recognized content type.
    pub fn typed_hit(title: &str, info_hash: &str, content_type: ContentType) -> SearchHit {
        let mut hit = hit(title, info_hash);
        hit.content_type = Some(content_type);
        hit
    }

    /// Create a test movie hit with a seeder count.
    pub fn movie_hit(title: &str, info_hash: &str, seeders: u32) -> SearchHit {
        let mut hit = typed_hit(title, info_hash, ContentType::Movie);
        hit.seeders = seeders;
        hit.size_bytes = 1024 * 1024 * 1024 * 4; // 4 GB
        hit
    }

    /// Create a test file entry with a known size.
    pub fn file(path: &str, size_bytes: u64) -> TorrentFile {
        TorrentFile {
            path: path.to_string(),
            size_bytes: Some(size_bytes),
        }
    }
}
