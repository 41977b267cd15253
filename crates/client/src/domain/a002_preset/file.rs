//! Preset documents on disk
//!
//! Same JSON shape as the export/import endpoints:
//! `[{"group": ..., "queries": [{"name", "command", "type"}]}]`.

use contracts::domain::a002_preset::aggregate::{validate_document, PresetDocument};
use std::path::Path;

use crate::shared::error::ClientError;

pub fn write_document(path: &Path, document: &PresetDocument) -> Result<(), ClientError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, serde_json::to_string_pretty(document)?)?;
    Ok(())
}

/// Reads and validates a document
pub fn read_document(path: &Path) -> Result<PresetDocument, ClientError> {
    let contents = std::fs::read_to_string(path)?;
    let document: PresetDocument = serde_json::from_str(&contents)?;
    validate_document(&document).map_err(ClientError::InvalidDocument)?;
    Ok(document)
}
