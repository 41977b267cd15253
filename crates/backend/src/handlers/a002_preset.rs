use axum::{extract::State, Json};
use contracts::domain::a002_preset::aggregate::{
    AddPresetGroupRequest, AddPresetRequest, DeleteGroupResult, GroupIdRequest, ImportSummary,
    Preset, PresetDocument, PresetGroup, PresetIdRequest,
};
use contracts::shared::api::{ApiData, ApiMessage};

use crate::domain::a002_preset::service;
use crate::shared::error::ApiResult;
use crate::shared::json::ApiJson;
use crate::shared::response;
use crate::shared::state::AppState;
use crate::system::auth::extractor::CurrentUser;

/// POST /auth/add-preset-group/
pub async fn add_group(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiJson(request): ApiJson<AddPresetGroupRequest>,
) -> ApiResult<Json<ApiData<PresetGroup>>> {
    let group = service::add_group(&state.db, &claims.sub, &request.group_name).await?;
    Ok(response::data(group))
}

/// POST /auth/get-preset-groups/
pub async fn list_groups(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> ApiResult<Json<ApiData<Vec<PresetGroup>>>> {
    Ok(response::data(service::list_groups(&state.db, &claims.sub).await?))
}

/// POST /auth/add-preset/
pub async fn add_preset(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiJson(request): ApiJson<AddPresetRequest>,
) -> ApiResult<Json<ApiData<Preset>>> {
    Ok(response::data(service::add_preset(&state.db, &claims.sub, request).await?))
}

/// POST /auth/get-presets/
pub async fn list_presets(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiJson(request): ApiJson<GroupIdRequest>,
) -> ApiResult<Json<ApiData<Vec<Preset>>>> {
    let presets = service::list_presets(&state.db, &claims.sub, &request.group_id).await?;
    Ok(response::data(presets))
}

/// POST /auth/delete-preset-group/
pub async fn delete_group(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiJson(request): ApiJson<GroupIdRequest>,
) -> ApiResult<Json<ApiData<DeleteGroupResult>>> {
    let result = service::delete_group(&state.db, &claims.sub, &request.group_id).await?;
    Ok(response::data(result))
}

/// POST /auth/delete-preset/
pub async fn delete_preset(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiJson(request): ApiJson<PresetIdRequest>,
) -> ApiResult<Json<ApiData<ApiMessage>>> {
    service::delete_preset(&state.db, &claims.sub, &request.preset_id).await?;
    Ok(response::message("Preset deleted"))
}

/// POST /auth/export-presets/
pub async fn export(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> ApiResult<Json<ApiData<PresetDocument>>> {
    Ok(response::data(service::export(&state.db, &claims.sub).await?))
}

/// POST /auth/import-presets/
pub async fn import(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiJson(document): ApiJson<PresetDocument>,
) -> ApiResult<Json<ApiData<ImportSummary>>> {
    Ok(response::data(service::import(&state.db, &claims.sub, document).await?))
}
