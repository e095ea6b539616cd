//! Domain types for search results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content classification reported by the index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Movie,
    TvShow,
    Music,
    Ebook,
    Comic,
    Audiobook,
    Software,
    Game,
    Xxx,
}

impl ContentType {
    /// Parse a backend content-type tag, case-insensitively.
    ///
    /// Returns `None` for unrecognized values; those results still render
    /// under the `all` category but never match a specific one.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "movie" => Some(Self::Movie),
            "tv_show" => Some(Self::TvShow),
            "music" => Some(Self::Music),
            "ebook" => Some(Self::Ebook),
            "comic" => Some(Self::Comic),
            "audiobook" => Some(Self::Audiobook),
            "software" => Some(Self::Software),
            "game" => Some(Self::Game),
            "xxx" => Some(Self::Xxx),
            _ => None,
        }
    }
}

/// Category filter selected by the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    All,
    Movie,
    TvShow,
    Music,
    Ebook,
    Comic,
    Audiobook,
    Software,
    Game,
    Xxx,
}

impl Category {
    /// The content type this category selects, `None` for `All`.
    pub fn content_type(self) -> Option<ContentType> {
        match self {
            Category::All => None,
            Category::Movie => Some(ContentType::Movie),
            Category::TvShow => Some(ContentType::TvShow),
            Category::Music => Some(ContentType::Music),
            Category::Ebook => Some(ContentType::Ebook),
            Category::Comic => Some(ContentType::Comic),
            Category::Audiobook => Some(ContentType::Audiobook),
            Category::Software => Some(ContentType::Software),
            Category::Game => Some(ContentType::Game),
            Category::Xxx => Some(ContentType::Xxx),
        }
    }

    /// Whether a hit with the given recognized content type passes this
    /// category. Unrecognized types (`None`) only pass under `All`.
    pub fn matches(self, content_type: Option<ContentType>) -> bool {
        match self.content_type() {
            None => true,
            Some(wanted) => content_type == Some(wanted),
        }
    }
}

/// A file within a torrent.
///
/// `size_bytes` is `None` only for the synthetic fallback entry produced
/// when neither the index nor the peer network had file data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TorrentFile {
    /// Path within the torrent.
    pub path: String,
    /// Size in bytes, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

/// One matched content item from the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Backend-assigned content hash (lowercase hex). Stable identity
    /// within one response page, not guaranteed unique across pages.
    pub info_hash: String,
    /// Display name, also the target of term re-filtering.
    pub title: String,
    /// Recognized content classification, `None` when the backend sent an
    /// unknown tag or nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(default)]
    pub seeders: u32,
    #[serde(default)]
    pub leechers: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// Name from the torrent metadata, preferred over `title` for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torrent_name: Option<String>,
    #[serde(default)]
    pub size_bytes: u64,
    /// Magnet URI, synthesized from the info hash when the index has none.
    pub magnet_uri: String,
}

impl SearchHit {
    /// Name shown on the result card.
    pub fn display_title(&self) -> &str {
        self.torrent_name.as_deref().unwrap_or(&self.title)
    }
}
