use axum::{extract::State, Json};
use contracts::domain::a001_bookmark::aggregate::{
    Bookmark, BookmarkNodeRequest, UpdateBookmarkDescriptionRequest,
};
use contracts::shared::api::{ApiData, ApiMessage};

use crate::domain::a001_bookmark::service::{self, BookmarkOutcome};
use crate::shared::error::ApiResult;
use crate::shared::json::ApiJson;
use crate::shared::response;
use crate::shared::state::AppState;
use crate::system::auth::extractor::CurrentUser;

/// POST /auth/bookmark-node/
pub async fn bookmark_node(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiJson(request): ApiJson<BookmarkNodeRequest>,
) -> ApiResult<Json<ApiData<ApiMessage>>> {
    let text = match service::bookmark_node(&state.db, &claims.sub, &request.node).await? {
        BookmarkOutcome::Created(_) => "Bookmark added",
        BookmarkOutcome::AlreadyExists => "Bookmark already exists",
    };
    Ok(response::message(text))
}

/// POST /auth/get-bookmarked-nodes/
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> ApiResult<Json<ApiData<Vec<Bookmark>>>> {
    Ok(response::data(service::list(&state.db, &claims.sub).await?))
}

/// POST /auth/delete-bookmarked-node/
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiJson(request): ApiJson<BookmarkNodeRequest>,
) -> ApiResult<Json<ApiData<ApiMessage>>> {
    service::delete(&state.db, &claims.sub, &request.node).await?;
    Ok(response::message("Bookmark deleted"))
}

/// POST /auth/update-bookmark-description/
pub async fn update_description(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiJson(request): ApiJson<UpdateBookmarkDescriptionRequest>,
) -> ApiResult<Json<ApiData<ApiMessage>>> {
    service::update_description(&state.db, &claims.sub, &request.node, &request.description)
        .await?;
    Ok(response::message("Bookmark updated"))
}
