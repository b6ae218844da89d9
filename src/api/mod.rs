use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::JwtConfig;
use crate::config::Config;
use crate::constants::uploads;
use crate::db::{AdminSeed, SnapshotPersistence, Store};
use crate::services::{
    AuthService, BlobStore, LocalBlobStore, MovieService, StoreAuthService, StoreMovieService,
};

mod admin;
pub mod auth;
mod error;
mod form;
mod movies;
mod observability;
mod settings;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,

    pub movie_service: Arc<dyn MovieService>,

    pub auth_service: Arc<dyn AuthService>,

    pub config: Arc<Config>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

/// Opens the store (seeding it when the snapshot is empty) and wires the
/// services on top of it.
pub async fn create_app_state(
    config: Config,
    persistence: Arc<dyn SnapshotPersistence>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::open(persistence, &AdminSeed::from(&config.auth)).await?;

    let blobs: Arc<dyn BlobStore> = Arc::new(LocalBlobStore::new(&config.general.uploads_path));
    let movie_service = Arc::new(StoreMovieService::new(
        store.clone(),
        blobs,
        config.uploads.max_file_size_bytes,
    ));
    let auth_service = Arc::new(StoreAuthService::new(
        store.clone(),
        JwtConfig::from(&config.auth),
    ));

    Ok(Arc::new(AppState {
        store,
        movie_service,
        auth_service,
        config: Arc::new(config),
        prometheus_handle,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let uploads_path = state.config.general.uploads_path.clone();
    let cors_origins = state.config.server.cors_allowed_origins.clone();
    let body_limit = state.config.uploads.max_file_size_bytes + uploads::BODY_LIMIT_HEADROOM_BYTES;

    let api_router = Router::new()
        .merge(public_routes())
        .merge(verify_routes(state.clone()))
        .merge(admin_routes(state.clone()))
        .fallback(endpoint_not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .nest_service(uploads::URL_PREFIX, ServeDir::new(uploads_path))
        .fallback(endpoint_not_found)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(movies::list_movies))
        .route("/movies/stats", get(movies::get_stats))
        .route("/movies/featured", get(movies::get_featured))
        .route("/movies/{identifier}", get(movies::get_movie))
        .route("/settings", get(settings::get_settings))
        .route("/auth/login", post(auth::login))
}

fn verify_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/verify", get(auth::verify))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}

fn admin_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/admin/movies",
            get(admin::list_movies).post(admin::create_movie),
        )
        .route(
            "/admin/movies/{id}",
            put(admin::update_movie).delete(admin::delete_movie),
        )
        .route("/admin/settings", put(settings::update_settings))
        .route("/admin/dashboard", get(admin::dashboard))
        .route("/admin/upload", post(admin::upload))
        .route("/admin/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::admin_middleware,
        ))
}

async fn endpoint_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("Endpoint not found")),
    )
}
