use serde::{Deserialize, Serialize};

use super::command::Connection;
use crate::shared::query_builder::QuerySpec;

/// Logical database (DBMS) known to the network
///
/// `name` mirrors `database_name` for pickers that expect a generic key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub database_name: String,
    #[serde(default)]
    pub name: String,
}

impl DatabaseInfo {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            database_name: name.clone(),
            name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub table_name: String,
    #[serde(default)]
    pub name: String,
}

impl TableInfo {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            table_name: name.clone(),
            name,
        }
    }
}

/// Column metadata of a table
///
/// Serialized with both the long (`column_name`, `data_type`) and the short
/// (`name`, `type`) keys; either form is accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ColumnInfoWire", into = "ColumnInfoWire")]
pub struct ColumnInfo {
    pub column_name: String,
    pub data_type: String,
}

impl ColumnInfo {
    pub fn new(column_name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            data_type: data_type.into(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ColumnInfoWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    column_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_type: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
}

impl From<ColumnInfoWire> for ColumnInfo {
    fn from(wire: ColumnInfoWire) -> Self {
        Self {
            column_name: wire.column_name.or(wire.name).unwrap_or_default(),
            data_type: wire.data_type.or(wire.kind).unwrap_or_default(),
        }
    }
}

impl From<ColumnInfo> for ColumnInfoWire {
    fn from(info: ColumnInfo) -> Self {
        Self {
            column_name: Some(info.column_name.clone()),
            name: Some(info.column_name),
            data_type: Some(info.data_type.clone()),
            kind: Some(info.data_type),
        }
    }
}

/// `/sql/get-databases/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabasesRequest {
    pub conn: Connection,
}

/// `/sql/get-tables/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesRequest {
    pub conn: Connection,
    #[serde(alias = "dbms")]
    pub database: String,
}

/// `/sql/get-columns/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnsRequest {
    pub conn: Connection,
    #[serde(alias = "dbms")]
    pub database: String,
    pub table: String,
}

/// `/sql/build-query/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryBuildRequest {
    #[serde(default)]
    pub spec: QuerySpec,
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
}
