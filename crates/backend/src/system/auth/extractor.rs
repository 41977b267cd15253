use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use contracts::system::auth::TokenClaims;

use super::{jwt, middleware::bearer_token};
use crate::shared::error::ApiError;
use crate::shared::state::AppState;

/// Extractor for getting current user from JWT token
/// Usage in handlers: `async fn handler(CurrentUser(claims): CurrentUser) -> Response`
pub struct CurrentUser(pub TokenClaims);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Extract TokenClaims from request extensions (set by middleware)
        parts
            .extensions
            .get::<TokenClaims>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(ApiError::unauthorized)
    }
}

/// Raw token of an authenticated request (set by middleware)
#[derive(Clone)]
pub struct AccessToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AccessToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AccessToken>()
            .cloned()
            .ok_or_else(ApiError::unauthorized)
    }
}

/// Caller identity on routes open to anonymous use
///
/// A missing or invalid token yields `None` instead of a rejection.
pub struct OptionalUser(pub Option<TokenClaims>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            return Ok(OptionalUser(None));
        };

        match jwt::validate_token(&state.db, token).await {
            Ok(claims) => Ok(OptionalUser(Some(claims))),
            Err(e) => {
                tracing::debug!("Ignoring invalid token on open route: {:#}", e);
                Ok(OptionalUser(None))
            }
        }
    }
}
