use axum::{
    Json,
    extract::{Multipart, Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::form::{MovieForm, read_multipart};
use super::validation::{ListScope, MovieListQuery};
use super::{ApiError, ApiResponse, AppState};
use crate::domain::MovieId;
use crate::models::MovieRecord;
use crate::services::stats::Dashboard;
use crate::services::{BlobError, StoredBlob};

/// Admin routes address movies by numeric id only. Anything else cannot
/// name a record, so it is a 404 rather than a 400.
fn parse_movie_id(raw: &str) -> Result<MovieId, ApiError> {
    raw.parse::<MovieId>()
        .map_err(|_| ApiError::movie_not_found())
}

/// GET /admin/movies
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    query: Result<Query<MovieListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<MovieRecord>>>, ApiError> {
    let Query(query) = query?;
    let options = query.into_options(ListScope::Admin)?;

    let page = state.movie_service.list(&options).await;
    Ok(Json(ApiResponse::paginated(page.items, page.pagination)))
}

/// POST /admin/movies
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    form: MovieForm,
) -> Result<(StatusCode, Json<ApiResponse<MovieRecord>>), ApiError> {
    let movie = state
        .movie_service
        .create(form.fields, form.poster)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(movie))))
}

/// PUT /admin/movies/{id}
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    form: MovieForm,
) -> Result<Json<ApiResponse<MovieRecord>>, ApiError> {
    let id = parse_movie_id(&id)?;
    let movie = state
        .movie_service
        .update(id, form.fields, form.poster)
        .await?;

    Ok(Json(ApiResponse::success(movie)))
}

/// DELETE /admin/movies/{id}
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = parse_movie_id(&id)?;
    state.movie_service.delete(id).await?;

    Ok(Json(ApiResponse::message("Movie deleted successfully")))
}

/// GET /admin/dashboard
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Dashboard>> {
    Json(ApiResponse::success(state.movie_service.dashboard().await))
}

/// POST /admin/upload
///
/// Stores the attachment sent in the `file` field.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<StoredBlob>>, ApiError> {
    let mut form = read_multipart(multipart, "file").await?;
    let file = form.files.pop().ok_or(BlobError::Missing)?;

    let stored = state.movie_service.upload(file).await?;
    Ok(Json(ApiResponse::success(stored)))
}
