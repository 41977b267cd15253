use axum::{extract::State, Json};
use contracts::domain::a003_node_history::aggregate::NodeHistoryEntry;
use contracts::shared::api::{ApiData, ApiMessage};

use crate::domain::a003_node_history::service;
use crate::shared::error::ApiResult;
use crate::shared::response;
use crate::shared::state::AppState;
use crate::system::auth::extractor::CurrentUser;

/// POST /auth/get-node-history/
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> ApiResult<Json<ApiData<Vec<NodeHistoryEntry>>>> {
    Ok(response::data(service::list(&state.db, &claims.sub).await?))
}

/// POST /auth/clear-node-history/
pub async fn clear(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> ApiResult<Json<ApiData<ApiMessage>>> {
    let removed = service::clear(&state.db, &claims.sub).await?;
    Ok(response::message(format!("Removed {} entries", removed)))
}
