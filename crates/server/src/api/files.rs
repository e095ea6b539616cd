//! Per-card file listing handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use maglens_core::{ResolutionTier, TorrentFile};

use crate::state::AppState;

use super::ErrorResponse;

#[derive(Debug, Serialize)]
pub struct FilesResponse {
    pub info_hash: String,
    pub tier: ResolutionTier,
    pub files: Vec<TorrentFile>,
}

/// GET /api/v1/torrents/{info_hash}/files
///
/// Resolve the file listing for a currently displayed result card.
/// Resolution itself never fails; only an unknown card is an error.
pub async fn resolve_files(
    State(state): State<Arc<AppState>>,
    Path(info_hash): Path<String>,
) -> Result<Json<FilesResponse>, (StatusCode, Json<ErrorResponse>)> {
    let hit = match state.session().find_hit(&info_hash).await {
        Some(hit) => hit,
        None => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("No displayed result with info hash {}", info_hash),
                }),
            ))
        }
    };

    let resolution = state.resolver().resolve(&hit).await;

    Ok(Json(FilesResponse {
        info_hash: hit.info_hash,
        tier: resolution.tier,
        files: resolution.files.clone(),
    }))
}
