use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

use super::{ApiError, ApiResponse, AppState};
use crate::models::Settings;

/// GET /settings
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Settings>> {
    Json(ApiResponse::success(state.store.settings().await))
}

/// PUT /admin/settings
///
/// Top-level keys in the body replace the stored ones; other keys are kept.
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<ApiResponse<Settings>>, ApiError> {
    let Json(patch) = payload?;
    let keys: Vec<&String> = patch.keys().collect();
    info!(keys = ?keys, "Updating site settings");

    let settings = state.store.merge_settings(patch).await;
    Ok(Json(ApiResponse::success(settings)))
}
