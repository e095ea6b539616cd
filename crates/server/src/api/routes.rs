use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{files, handlers, search};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health, config and metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        // Search session
        .route("/search", post(search::submit))
        .route("/search/category", post(search::set_category))
        .route("/search/sort", post(search::set_sort))
        .route("/search/next", post(search::next_page))
        .route("/search/prev", post(search::prev_page))
        .route("/search/results", get(search::current_results))
        // Per-card file listings
        .route("/torrents/{info_hash}/files", get(files::resolve_files))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
