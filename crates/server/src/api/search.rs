//! Search session handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use maglens_core::{Category, PageView, SearchError, SortKey};

use crate::state::AppState;

use super::ErrorResponse;

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub query: String,
    #[serde(default)]
    pub category: Option<Category>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub category: Category,
}

#[derive(Debug, Deserialize)]
pub struct SortRequest {
    pub sort: SortKey,
}

type ApiResult = Result<Json<PageView>, (StatusCode, Json<ErrorResponse>)>;

fn to_response(result: Result<PageView, SearchError>) -> ApiResult {
    result.map(Json).map_err(|e| {
        let status = match &e {
            SearchError::EmptyQuery
            | SearchError::NoNextPage
            | SearchError::NoPreviousPage => StatusCode::BAD_REQUEST,
            SearchError::Superseded => StatusCode::CONFLICT,
            SearchError::Backend(_) => StatusCode::BAD_GATEWAY,
        };
        (
            status,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/search
///
/// Submit a new search, optionally switching category. Resets to page 1.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SubmitRequest>,
) -> ApiResult {
    to_response(
        state
            .session()
            .submit_query(&body.query, body.category)
            .await,
    )
}

/// POST /api/v1/search/category
///
/// Switch the category filter; re-fetches page 1 when a query is active.
pub async fn set_category(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CategoryRequest>,
) -> ApiResult {
    to_response(state.session().set_category(body.category).await)
}

/// POST /api/v1/search/sort
///
/// Change the sort key; re-sorts the held page without re-fetching.
pub async fn set_sort(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SortRequest>,
) -> Json<PageView> {
    Json(state.session().set_sort(body.sort).await)
}

/// POST /api/v1/search/next
pub async fn next_page(State(state): State<Arc<AppState>>) -> ApiResult {
    to_response(state.session().next_page().await)
}

/// POST /api/v1/search/prev
pub async fn prev_page(State(state): State<Arc<AppState>>) -> ApiResult {
    to_response(state.session().prev_page().await)
}

/// GET /api/v1/search/results
///
/// Snapshot of the current page in its selected sort order.
pub async fn current_results(State(state): State<Arc<AppState>>) -> Json<PageView> {
    Json(state.session().current_view().await)
}
