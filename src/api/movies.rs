use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use super::validation::{ListScope, MovieListQuery};
use super::{ApiError, ApiResponse, AppState};
use crate::db::MovieKey;
use crate::models::MovieRecord;
use crate::services::stats::PublicStats;

/// GET /movies
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    query: Result<Query<MovieListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<MovieRecord>>>, ApiError> {
    let Query(query) = query?;
    let options = query.into_options(ListScope::Public)?;

    let page = state.movie_service.list(&options).await;
    Ok(Json(ApiResponse::paginated(page.items, page.pagination)))
}

/// GET /movies/{identifier}
///
/// Looks up a published movie by numeric id or slug and counts the view.
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Result<Json<ApiResponse<MovieRecord>>, ApiError> {
    let key = MovieKey::parse(&identifier);
    let movie = state.movie_service.view(&key).await?;
    Ok(Json(ApiResponse::success(movie)))
}

/// GET /movies/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<PublicStats>> {
    Json(ApiResponse::success(state.movie_service.stats().await))
}

/// GET /movies/featured
pub async fn get_featured(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<MovieRecord>>> {
    Json(ApiResponse::success(state.movie_service.featured().await))
}
