use contracts::domain::a002_preset::aggregate::{
    validate_document, AddPresetGroupRequest, AddPresetRequest, DeleteGroupResult,
    GroupIdRequest, ImportSummary, Preset, PresetDocument, PresetGroup, PresetIdRequest,
};
use contracts::shared::anylog::CommandMethod;
use contracts::shared::api::ApiMessage;
use serde_json::json;
use std::path::Path;

use super::file;
use crate::shared::api_client::ApiClient;
use crate::shared::api_utils::require;
use crate::shared::error::ClientError;

pub async fn add_group(client: &ApiClient, group_name: &str) -> Result<PresetGroup, ClientError> {
    let request = AddPresetGroupRequest {
        group_name: require("group_name", group_name)?.to_string(),
    };
    client.post_auth("/auth/add-preset-group/", &request).await
}

pub async fn list_groups(client: &ApiClient) -> Result<Vec<PresetGroup>, ClientError> {
    client.post_auth("/auth/get-preset-groups/", &json!({})).await
}

pub async fn add_preset(
    client: &ApiClient,
    group_id: &str,
    command: &str,
    method: CommandMethod,
    button: &str,
) -> Result<Preset, ClientError> {
    let request = AddPresetRequest {
        group_id: require("group_id", group_id)?.to_string(),
        command: require("command", command)?.to_string(),
        method: method.as_str().to_string(),
        button: require("button", button)?.to_string(),
    };
    client.post_auth("/auth/add-preset/", &request).await
}

pub async fn list_presets(client: &ApiClient, group_id: &str) -> Result<Vec<Preset>, ClientError> {
    let request = GroupIdRequest {
        group_id: require("group_id", group_id)?.to_string(),
    };
    client.post_auth("/auth/get-presets/", &request).await
}

pub async fn delete_group(
    client: &ApiClient,
    group_id: &str,
) -> Result<DeleteGroupResult, ClientError> {
    let request = GroupIdRequest {
        group_id: require("group_id", group_id)?.to_string(),
    };
    client.post_auth("/auth/delete-preset-group/", &request).await
}

pub async fn delete_preset(client: &ApiClient, preset_id: &str) -> Result<ApiMessage, ClientError> {
    let request = PresetIdRequest {
        preset_id: require("preset_id", preset_id)?.to_string(),
    };
    client.post_auth("/auth/delete-preset/", &request).await
}

pub async fn export(client: &ApiClient) -> Result<PresetDocument, ClientError> {
    client.post_auth("/auth/export-presets/", &json!({})).await
}

/// The document is checked locally first so a bad entry never reaches
/// the backend
pub async fn import(
    client: &ApiClient,
    document: &PresetDocument,
) -> Result<ImportSummary, ClientError> {
    validate_document(document).map_err(ClientError::InvalidDocument)?;
    client.post_auth("/auth/import-presets/", document).await
}

/// Export every group of the user into a JSON file
pub async fn export_to_file(client: &ApiClient, path: &Path) -> Result<usize, ClientError> {
    let document = export(client).await?;
    file::write_document(path, &document)?;
    tracing::info!("Exported {} preset groups to {}", document.len(), path.display());
    Ok(document.len())
}

/// Import a JSON file produced by [`export_to_file`] or written by hand
pub async fn import_from_file(client: &ApiClient, path: &Path) -> Result<ImportSummary, ClientError> {
    let document = file::read_document(path)?;
    let summary = import(client, &document).await?;
    tracing::info!(
        "Imported {}: {} groups created, {} presets added, {} skipped",
        path.display(),
        summary.groups_created,
        summary.presets_added,
        summary.presets_skipped
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::storage::SessionStore;
    use contracts::domain::a002_preset::aggregate::{PresetGroupExport, PresetQuery};

    #[tokio::test]
    async fn test_invalid_document_is_rejected_before_session_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let client = ApiClient::new(
            "http://127.0.0.1:9",
            SessionStore::new(dir.path().join("session.json")),
        );
        let document = vec![PresetGroupExport {
            group: "Status".to_string(),
            queries: vec![PresetQuery::new("", "get status", CommandMethod::Get)],
        }];

        assert!(matches!(
            import(&client, &document).await,
            Err(ClientError::InvalidDocument(_))
        ));
        assert!(matches!(
            export(&client).await,
            Err(ClientError::NotAuthenticated)
        ));
    }
}
