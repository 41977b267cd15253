use serde::{Deserialize, Serialize};

use crate::shared::anylog::CommandMethod;

// ============================================================================
// Stored records
// ============================================================================

/// Named collection of presets, unique per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetGroup {
    pub id: String,
    pub group_name: String,
    pub created_at: String,
}

/// Saved command shown as a button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub group_id: String,
    pub command: String,
    #[serde(rename = "type")]
    pub method: CommandMethod,
    pub button: String,
    pub created_at: String,
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddPresetGroupRequest {
    #[serde(default)]
    pub group_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddPresetRequest {
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub command: String,
    #[serde(default, rename = "type")]
    pub method: String,
    #[serde(default)]
    pub button: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupIdRequest {
    #[serde(default)]
    pub group_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresetIdRequest {
    #[serde(default)]
    pub preset_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteGroupResult {
    pub group_id: String,
    pub deleted_presets: u64,
}

// ============================================================================
// Export / import document
// ============================================================================

/// `[{group, queries: [{name, command, type}]}]`
pub type PresetDocument = Vec<PresetGroupExport>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetGroupExport {
    pub group: String,
    #[serde(default)]
    pub queries: Vec<PresetQuery>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetQuery {
    /// Button label
    pub name: String,
    pub command: String,
    #[serde(rename = "type", default = "default_query_type")]
    pub method: String,
}

fn default_query_type() -> String {
    CommandMethod::Get.as_str().to_string()
}

impl PresetQuery {
    pub fn new(name: impl Into<String>, command: impl Into<String>, method: CommandMethod) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            method: method.as_str().to_string(),
        }
    }
}

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub groups_created: u64,
    pub presets_added: u64,
    pub presets_skipped: u64,
}

/// Checks every entry of a document, returning the first problem found
pub fn validate_document(document: &[PresetGroupExport]) -> Result<(), String> {
    for (gi, group) in document.iter().enumerate() {
        if group.group.trim().is_empty() {
            return Err(format!("Entry {}: group name is required", gi));
        }
        for (qi, query) in group.queries.iter().enumerate() {
            if query.name.trim().is_empty() {
                return Err(format!("Group '{}', query {}: name is required", group.group, qi));
            }
            if query.command.trim().is_empty() {
                return Err(format!(
                    "Group '{}', query {}: command is required",
                    group.group, qi
                ));
            }
            if CommandMethod::parse(&query.method).is_none() {
                return Err(format!(
                    "Group '{}', query {}: type must be GET or POST",
                    group.group, qi
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_parses_without_type() {
        let doc: PresetDocument = serde_json::from_str(
            r#"[{"group": "status", "queries": [{"name": "Node status", "command": "get status"}]}]"#,
        )
        .unwrap();
        assert_eq!(doc[0].queries[0].method, "GET");
        assert!(validate_document(&doc).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_entries() {
        let blank_group = vec![PresetGroupExport {
            group: " ".into(),
            queries: vec![],
        }];
        assert!(validate_document(&blank_group).is_err());

        let bad_type = vec![PresetGroupExport {
            group: "g".into(),
            queries: vec![PresetQuery {
                name: "n".into(),
                command: "get status".into(),
                method: "DELETE".into(),
            }],
        }];
        assert!(validate_document(&bad_type)
            .unwrap_err()
            .contains("GET or POST"));
    }
}
