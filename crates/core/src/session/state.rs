//! Session-scoped search state.

use crate::query::PAGE_SIZE;
use crate::results::{Category, SearchHit, SortKey};

/// Mutable state of the single active search session.
///
/// `last_results` holds the current page after re-filtering but before
/// sorting; the sorted view is recomputed on demand so changing the sort
/// key never re-fetches. `last_fetch_count` is the raw pre-filter item
/// count of the most recent fetch and drives the next-page heuristic.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub query: String,
    pub category: Category,
    pub sort_key: SortKey,
    /// Current 1-based page.
    pub page: u32,
    pub last_results: Vec<SearchHit>,
    pub last_fetch_count: usize,
    /// Duration of the most recent index call in milliseconds.
    pub last_duration_ms: u64,
    /// Token of the most recently issued fetch. A response carrying an
    /// older token is stale and must be discarded.
    pub epoch: u64,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: Category::All,
            sort_key: SortKey::Relevance,
            page: 1,
            last_results: Vec::new(),
            last_fetch_count: 0,
            last_duration_ms: 0,
            epoch: 0,
        }
    }
}

impl SearchState {
    /// Whether a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page may exist.
    ///
    /// The index exposes no total count, so this is inferred from whether
    /// the last fetch was saturated. A corpus that ends on an exact
    /// multiple of the page size yields one false positive; the extra
    /// click then shows an empty page. Accepted trade-off.
    pub fn has_next(&self) -> bool {
        self.last_fetch_count == PAGE_SIZE as usize
    }
}
