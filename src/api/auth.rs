use axum::{
    Extension, Json,
    extract::{Request, State, rejection::JsonRejection},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, IdentityDto, LoginRequest};
use crate::auth::Claims;
use crate::services::LoginResult;

// ============================================================================
// Middleware
// ============================================================================

/// Authenticates the bearer token and binds the decoded [`Claims`] to the
/// request.
///
/// A missing token is a 401; a token that fails verification is a 403.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = authenticate(&state, request.headers())?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// [`auth_middleware`] followed by a role check. Non-admins get a 403.
pub async fn admin_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = authenticate(&state, request.headers())?;

    if !claims.role.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Claims, ApiError> {
    let token = extract_bearer_token(headers)
        .ok_or_else(|| ApiError::Unauthorized("Access token required".to_string()))?;

    let claims = state.auth_service.verify_token(token)?;
    tracing::Span::current().record("user_id", claims.sub.value());
    Ok(claims)
}

/// Extract the token from `Authorization: Bearer <token>`.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    let Json(payload) = payload?;

    let result = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    tracing::Span::current().record("user_id", result.user.id.value());
    Ok(Json(ApiResponse::success(result)))
}

/// GET /auth/verify
pub async fn verify(Extension(claims): Extension<Claims>) -> Json<ApiResponse<IdentityDto>> {
    Json(ApiResponse::success(IdentityDto::from(claims)))
}
