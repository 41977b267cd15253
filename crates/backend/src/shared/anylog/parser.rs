//! Turns node replies into the shapes the console works with
//!
//! Every parser is lenient: a text reply or an unexpected JSON shape
//! yields an empty list.

use contracts::shared::anylog::{ColumnInfo, DatabaseInfo, NodeResponse, TableInfo, MONITORED_KEYS};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Columns every AnyLog table carries for internal bookkeeping
const SYSTEM_COLUMNS: &[&str] = &["row_id", "tsd_name", "tsd_id"];

fn json_rows(response: &NodeResponse) -> &[Value] {
    if !response.is_json() {
        return &[];
    }
    match &response.data {
        Value::Array(rows) => rows,
        _ => &[],
    }
}

/// Sorted unique non-blank values of `key` across `get data nodes` rows
fn unique_field(response: &NodeResponse, key: &str) -> Vec<String> {
    json_rows(response)
        .iter()
        .filter_map(|row| row.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn parse_databases(response: &NodeResponse) -> Vec<DatabaseInfo> {
    unique_field(response, "DBMS")
        .into_iter()
        .map(DatabaseInfo::new)
        .collect()
}

pub fn parse_tables(response: &NodeResponse) -> Vec<TableInfo> {
    unique_field(response, "Table")
        .into_iter()
        .map(TableInfo::new)
        .collect()
}

/// `get columns ... format=json` replies with `{column: type}`; columns keep
/// the table's order
pub fn parse_columns(response: &NodeResponse) -> Vec<ColumnInfo> {
    if !response.is_json() {
        return Vec::new();
    }
    let Value::Object(map) = &response.data else {
        return Vec::new();
    };

    map.iter()
        .filter(|(name, _)| !SYSTEM_COLUMNS.contains(&name.as_str()))
        .map(|(name, data_type)| {
            let data_type = match data_type {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            ColumnInfo::new(name.clone(), data_type)
        })
        .collect()
}

/// Addresses from `test network` whose status is `+`
pub fn parse_network_nodes(response: &NodeResponse) -> Vec<String> {
    json_rows(response)
        .iter()
        .filter(|row| row.get("Status").and_then(Value::as_str).map(str::trim) == Some("+"))
        .filter_map(|row| row.get("Address").and_then(Value::as_str))
        .map(|addr| addr.trim().to_string())
        .collect()
}

/// Entries of `get monitored operators`, reduced to the monitored keys
///
/// The node answers with an object keyed by operator; a plain list is
/// accepted too.
pub fn parse_monitored(response: &NodeResponse) -> Vec<Map<String, Value>> {
    if !response.is_json() {
        return Vec::new();
    }
    let entries: Vec<&Value> = match &response.data {
        Value::Object(map) => map.values().collect(),
        Value::Array(rows) => rows.iter().collect(),
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(Value::as_object)
        .map(|entry| {
            MONITORED_KEYS
                .iter()
                .filter_map(|key| entry.get(*key).map(|v| (key.to_string(), v.clone())))
                .collect::<Map<String, Value>>()
        })
        .collect()
}
