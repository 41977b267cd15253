use axum::{extract::State, Json};
use contracts::shared::api::{ApiData, ApiMessage};
use contracts::system::auth::{LoginRequest, LoginResponse, SignupRequest, UserInfo};

use crate::shared::error::{ApiError, ApiResult};
use crate::shared::json::ApiJson;
use crate::shared::response;
use crate::shared::state::AppState;
use crate::system::auth::extractor::{AccessToken, CurrentUser};
use crate::system::{auth::jwt, users::service as user_service};

async fn issue_session(state: &AppState, user: UserInfo) -> ApiResult<LoginResponse> {
    let access_token = jwt::generate_access_token(
        &state.db,
        &user.id,
        &user.email,
        state.config.auth.token_lifetime_hours,
    )
    .await?;

    Ok(LoginResponse { user, access_token })
}

/// POST /auth/signup/
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> ApiResult<Json<ApiData<LoginResponse>>> {
    let user = user_service::signup(&state.db, request).await?;
    let session = issue_session(&state, user.into()).await?;
    Ok(response::data(session))
}

/// POST /auth/login/
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<Json<ApiData<LoginResponse>>> {
    let user = user_service::verify_credentials(&state.db, &request.email, &request.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    tracing::info!("User {} logged in", user.email);
    let session = issue_session(&state, user.into()).await?;
    Ok(response::data(session))
}

/// POST /auth/logout/
pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    AccessToken(token): AccessToken,
) -> ApiResult<Json<ApiData<ApiMessage>>> {
    jwt::revoke_token(&state.db, &token).await?;
    tracing::info!("User {} logged out", claims.email);
    Ok(response::message("Logged out"))
}

/// GET /auth/get-user/
pub async fn current_user(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> ApiResult<Json<ApiData<UserInfo>>> {
    let user = user_service::get_by_id(&state.db, &claims.sub)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(response::data(UserInfo::from(user)))
}
