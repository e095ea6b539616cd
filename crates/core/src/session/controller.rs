//! Top-level session controller driving the reconciliation pipeline.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use crate::backend::{BackendError, SearchBackend, SearchRequest};
use crate::metrics;
use crate::query::{broaden, page_offset, PAGE_SIZE};
use crate::results::{
    filter_by_category, filter_by_terms, sorted, Category, SearchHit, SortKey,
};

use super::SearchState;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Empty query")]
    EmptyQuery,

    #[error("Superseded by a newer search")]
    Superseded,

    #[error("No previous page")]
    NoPreviousPage,

    #[error("No further pages")]
    NoNextPage,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Snapshot of the current page as the presentation layer should show it.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub query: String,
    pub category: Category,
    pub sort: SortKey,
    pub page: u32,
    pub result_count: usize,
    pub duration_ms: u64,
    pub has_prev: bool,
    pub has_next: bool,
    pub results: Vec<SearchHit>,
}

/// Parameters of one issued fetch, captured under the state lock.
struct FetchTicket {
    token: u64,
    request: SearchRequest,
    raw_query: String,
    category: Category,
}

/// Owns the session state and runs the search pipeline over it.
///
/// Fetches run without holding the state lock: each one takes an epoch
/// token when it starts, and commits its page only if no newer fetch was
/// issued in the meantime. A slow, stale response therefore can never
/// overwrite a newer result set.
pub struct SessionController {
    backend: Arc<dyn SearchBackend>,
    state: RwLock<SearchState>,
}

impl SessionController {
    /// Create a controller with default state.
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            backend,
            state: RwLock::new(SearchState::default()),
        }
    }

    /// Submit a new search, optionally switching category at the same
    /// time. Resets to page 1. A blank query is rejected before any
    /// request is issued.
    pub async fn submit_query(
        &self,
        query: &str,
        category: Option<Category>,
    ) -> Result<PageView, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let ticket = {
            let mut state = self.state.write().await;
            state.query = query.to_string();
            if let Some(category) = category {
                state.category = category;
            }
            state.page = 1;
            Self::begin_fetch(&mut state)
        };
        self.run_fetch(ticket).await
    }

    /// Switch the category filter. Resets to page 1 and re-fetches when a
    /// query is active; otherwise just records the selection.
    pub async fn set_category(&self, category: Category) -> Result<PageView, SearchError> {
        let ticket = {
            let mut state = self.state.write().await;
            state.category = category;
            state.page = 1;
            if state.query.is_empty() {
                return Ok(Self::view(&state));
            }
            Self::begin_fetch(&mut state)
        };
        self.run_fetch(ticket).await
    }

    /// Change the sort key. Applies client-side to the held page, never
    /// re-fetches and never touches pagination.
    pub async fn set_sort(&self, sort: SortKey) -> PageView {
        let mut state = self.state.write().await;
        state.sort_key = sort;
        Self::view(&state)
    }

    /// Advance to the next page. Only available when the last fetch
    /// returned a saturated page.
    pub async fn next_page(&self) -> Result<PageView, SearchError> {
        let ticket = {
            let mut state = self.state.write().await;
            if !state.has_next() {
                return Err(SearchError::NoNextPage);
            }
            state.page += 1;
            Self::begin_fetch(&mut state)
        };
        self.run_fetch(ticket).await
    }

    /// Go back one page.
    pub async fn prev_page(&self) -> Result<PageView, SearchError> {
        let ticket = {
            let mut state = self.state.write().await;
            if !state.has_prev() {
                return Err(SearchError::NoPreviousPage);
            }
            state.page -= 1;
            Self::begin_fetch(&mut state)
        };
        self.run_fetch(ticket).await
    }

    /// Snapshot the current page without touching the backend.
    pub async fn current_view(&self) -> PageView {
        Self::view(&*self.state.read().await)
    }

    /// Find a currently displayed hit by its info hash.
    pub async fn find_hit(&self, info_hash: &str) -> Option<SearchHit> {
        self.state
            .read()
            .await
            .last_results
            .iter()
            .find(|h| h.info_hash.eq_ignore_ascii_case(info_hash))
            .cloned()
    }

    fn begin_fetch(state: &mut SearchState) -> FetchTicket {
        state.epoch += 1;
        FetchTicket {
            token: state.epoch,
            request: SearchRequest {
                query_string: broaden(&state.query),
                limit: PAGE_SIZE,
                offset: page_offset(state.page),
            },
            raw_query: state.query.clone(),
            category: state.category,
        }
    }

    async fn run_fetch(&self, ticket: FetchTicket) -> Result<PageView, SearchError> {
        let fetched = self.backend.search(&ticket.request).await;

        let mut state = self.state.write().await;
        if state.epoch != ticket.token {
            debug!(token = ticket.token, "Discarding superseded search response");
            metrics::SEARCHES_TOTAL
                .with_label_values(&["superseded"])
                .inc();
            return Err(SearchError::Superseded);
        }

        let page = match fetched {
            Ok(page) => page,
            Err(e) => {
                metrics::SEARCHES_TOTAL.with_label_values(&["error"]).inc();
                return Err(e.into());
            }
        };

        state.last_fetch_count = page.hits.len();
        state.last_duration_ms = page.duration_ms;

        let matched = filter_by_terms(page.hits, &ticket.raw_query);
        state.last_results = filter_by_category(matched, ticket.category);

        metrics::SEARCHES_TOTAL.with_label_values(&["ok"]).inc();
        metrics::SEARCH_DURATION
            .with_label_values(&[])
            .observe(page.duration_ms as f64 / 1000.0);
        metrics::SEARCH_RESULTS
            .with_label_values(&[])
            .observe(state.last_results.len() as f64);

        debug!(
            page = state.page,
            fetched = state.last_fetch_count,
            kept = state.last_results.len(),
            "Search page committed"
        );

        Ok(Self::view(&state))
    }

    fn view(state: &SearchState) -> PageView {
        PageView {
            query: state.query.clone(),
            category: state.category,
            sort: state.sort_key,
            page: state.page,
            result_count: state.last_results.len(),
            duration_ms: state.last_duration_ms,
            has_prev: state.has_prev(),
            has_next: state.has_next(),
            results: sorted(&state.last_results, state.sort_key),
        }
    }
}
