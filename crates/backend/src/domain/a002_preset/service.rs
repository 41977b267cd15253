use contracts::domain::a002_preset::aggregate::{
    validate_document, AddPresetRequest, DeleteGroupResult, ImportSummary, Preset, PresetDocument,
    PresetGroup, PresetGroupExport, PresetQuery,
};
use contracts::shared::anylog::CommandMethod;
use sea_orm::{DatabaseConnection, TransactionTrait};

use super::repository;
use crate::shared::data::db::is_unique_violation;
use crate::shared::error::{ApiError, ApiResult};

fn group_not_found() -> ApiError {
    ApiError::not_found("Preset group not found")
}

pub async fn add_group(db: &DatabaseConnection, user_id: &str, group_name: &str) -> ApiResult<PresetGroup> {
    let group_name = group_name.trim();
    if group_name.is_empty() {
        return Err(ApiError::bad_request("Field 'group_name' is required"));
    }

    match repository::insert_group(db, user_id, group_name).await {
        Ok(group) => Ok(group),
        Err(e) if is_unique_violation(&e) => Err(ApiError::bad_request("Group already exists")),
        Err(e) => Err(e.into()),
    }
}

pub async fn list_groups(db: &DatabaseConnection, user_id: &str) -> ApiResult<Vec<PresetGroup>> {
    Ok(repository::list_groups(db, user_id).await?)
}

pub async fn add_preset(db: &DatabaseConnection, user_id: &str, dto: AddPresetRequest) -> ApiResult<Preset> {
    let command = dto.command.trim();
    let button = dto.button.trim();
    if command.is_empty() {
        return Err(ApiError::bad_request("Field 'command' is required"));
    }
    if button.is_empty() {
        return Err(ApiError::bad_request("Field 'button' is required"));
    }
    let method = CommandMethod::parse(&dto.method)
        .ok_or_else(|| ApiError::bad_request("Field 'type' must be GET or POST"))?;

    let group = repository::get_group(db, user_id, dto.group_id.trim())
        .await?
        .ok_or_else(group_not_found)?;

    Ok(repository::insert_preset(db, user_id, &group.id, command, method, button).await?)
}

pub async fn list_presets(db: &DatabaseConnection, user_id: &str, group_id: &str) -> ApiResult<Vec<Preset>> {
    let group = repository::get_group(db, user_id, group_id.trim())
        .await?
        .ok_or_else(group_not_found)?;
    Ok(repository::list_presets(db, user_id, &group.id).await?)
}

/// Removes a group together with all of its presets
pub async fn delete_group(db: &DatabaseConnection, user_id: &str, group_id: &str) -> ApiResult<DeleteGroupResult> {
    let group = repository::get_group(db, user_id, group_id.trim())
        .await?
        .ok_or_else(group_not_found)?;

    let txn = db.begin().await?;
    let deleted_presets = repository::delete_group_cascade(&txn, user_id, &group.id).await?;
    txn.commit().await?;

    tracing::info!(
        "Deleted preset group '{}' with {} presets",
        group.group_name,
        deleted_presets
    );
    Ok(DeleteGroupResult {
        group_id: group.id,
        deleted_presets,
    })
}

pub async fn delete_preset(db: &DatabaseConnection, user_id: &str, preset_id: &str) -> ApiResult<()> {
    if !repository::delete_preset(db, user_id, preset_id.trim()).await? {
        return Err(ApiError::not_found("Preset not found"));
    }
    Ok(())
}

/// Every group of the user with its presets, empty groups included
pub async fn export(db: &DatabaseConnection, user_id: &str) -> ApiResult<PresetDocument> {
    let mut document = Vec::new();
    for group in repository::list_groups(db, user_id).await? {
        let queries = repository::list_presets(db, user_id, &group.id)
            .await?
            .into_iter()
            .map(|p| PresetQuery::new(p.button, p.command, p.method))
            .collect();
        document.push(PresetGroupExport {
            group: group.group_name,
            queries,
        });
    }
    Ok(document)
}

/// Merges a document into the user's presets
///
/// The whole document is validated before anything is written; the write
/// itself runs in one transaction.
pub async fn import(db: &DatabaseConnection, user_id: &str, document: PresetDocument) -> ApiResult<ImportSummary> {
    validate_document(&document).map_err(ApiError::BadRequest)?;

    let mut summary = ImportSummary::default();
    let txn = db.begin().await?;

    for entry in &document {
        let group_name = entry.group.trim();
        let group = match repository::find_group_by_name(&txn, user_id, group_name).await? {
            Some(group) => group,
            None => {
                summary.groups_created += 1;
                repository::insert_group(&txn, user_id, group_name).await?
            }
        };

        for query in &entry.queries {
            let button = query.name.trim();
            let command = query.command.trim();
            if repository::preset_exists(&txn, &group.id, button, command).await? {
                summary.presets_skipped += 1;
                continue;
            }
            let method = CommandMethod::parse(&query.method).unwrap_or_default();
            repository::insert_preset(&txn, user_id, &group.id, command, method, button).await?;
            summary.presets_added += 1;
        }
    }

    txn.commit().await?;
    tracing::info!(
        "Imported presets for {}: {} groups created, {} added, {} skipped",
        user_id,
        summary.groups_created,
        summary.presets_added,
        summary.presets_skipped
    );
    Ok(summary)
}
