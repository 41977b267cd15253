use axum::{
    body::Body,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use super::extractor::AccessToken;
use crate::shared::error::ApiError;
use crate::shared::state::AppState;

/// Token from `Authorization: Bearer <token>`, if present
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware that requires valid JWT authentication
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())
        .ok_or_else(ApiError::unauthorized)?
        .to_string();

    let claims = super::jwt::validate_token(&state.db, &token)
        .await
        .map_err(|e| {
            tracing::debug!("Rejected token: {:#}", e);
            ApiError::Unauthorized("Invalid or expired session".to_string())
        })?;

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);
    req.extensions_mut().insert(AccessToken(token));

    Ok(next.run(req).await)
}
