//! Streaming JSON rows into a table through the node's REST message broker
//!
//! A message client subscribed to [`TOPIC`] maps every row field onto a
//! column; the rows are then posted with the `data` command.

use contracts::shared::anylog::{CommandMethod, DbConnection, NodeResponse};
use serde_json::{Map, Value};

use super::connector::NodeConnector;
use crate::shared::error::{ApiError, ApiResult};

pub const TOPIC: &str = "new-data";

const NO_SUBSCRIPTIONS: &str = "No message client subscriptions";

/// Column type for every field, in first-seen order
///
/// A field's type comes from its first non-null value; fields that are
/// only ever null are treated as text.
pub fn infer_schema(rows: &[Map<String, Value>]) -> Vec<(String, &'static str)> {
    let mut schema: Vec<(String, Option<&'static str>)> = Vec::new();
    for row in rows {
        for (key, value) in row {
            let kind = value_type(value);
            match schema.iter_mut().find(|(name, _)| name == key) {
                Some(entry) if entry.1.is_none() => entry.1 = kind,
                Some(_) => {}
                None => schema.push((key.clone(), kind)),
            }
        }
    }
    schema
        .into_iter()
        .map(|(name, kind)| (name, kind.unwrap_or("str")))
        .collect()
}

fn value_type(value: &Value) -> Option<&'static str> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some("bool"),
        Value::Number(n) if n.is_f64() => Some("float"),
        Value::Number(_) => Some("int"),
        _ => Some("str"),
    }
}

/// `run msg client where broker=rest ... topic=(name=new-data and ...)`
pub fn msg_client_command(schema: &[(String, &'static str)]) -> String {
    let columns: Vec<String> = schema
        .iter()
        .map(|(name, kind)| format!("column.{name}=(type={kind} and value=bring [{name}])"))
        .collect();
    format!(
        "run msg client where broker=rest and user-agent=anylog and log=false and topic=(name={} and dbms=\"bring [dbms]\" and table=\"bring [table]\" and {})",
        TOPIC,
        columns.join(" and ")
    )
}

/// Rows tagged with their target `dbms` and `table`
pub fn prep_rows(rows: &[Map<String, Value>], target: &DbConnection) -> Vec<Map<String, Value>> {
    rows.iter()
        .map(|row| {
            let mut row = row.clone();
            row.insert("dbms".into(), Value::String(target.dbms.trim().to_string()));
            row.insert("table".into(), Value::String(target.table.trim().to_string()));
            row
        })
        .collect()
}

/// Id of the subscribed client from the first line of
/// `get msg client where topic = new-data`, e.g. `Client ID: 3`
pub fn parse_client_id(listing: &str) -> Option<u32> {
    let first = listing.trim().lines().next()?;
    let (_, id) = first.split_once(": ")?;
    id.trim().parse().ok()
}

fn reply_text(reply: &NodeResponse) -> String {
    match &reply.data {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn validate(target: &DbConnection, rows: &[Map<String, Value>]) -> ApiResult<()> {
    let usable = |s: &str| {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    };
    if !usable(target.dbms.trim()) {
        return Err(ApiError::bad_request("Field 'dbms' is required"));
    }
    if !usable(target.table.trim()) {
        return Err(ApiError::bad_request("Field 'table' is required"));
    }
    if rows.is_empty() {
        return Err(ApiError::bad_request("Field 'data' must contain at least one row"));
    }
    for row in rows {
        for key in row.keys() {
            if !usable(key.as_str()) {
                return Err(ApiError::bad_request(format!(
                    "Field name '{}' cannot be used as a column",
                    key
                )));
            }
            if key == "dbms" || key == "table" {
                return Err(ApiError::bad_request(format!(
                    "Field name '{}' is reserved",
                    key
                )));
            }
        }
    }
    Ok(())
}

/// Replaces any message client on [`TOPIC`], posts the rows and returns
/// the node's `get streaming` report
pub async fn add_data(
    connector: &dyn NodeConnector,
    conn: &str,
    target: &DbConnection,
    rows: &[Map<String, Value>],
) -> ApiResult<NodeResponse> {
    validate(target, rows)?;

    let schema = infer_schema(rows);
    let client_command = msg_client_command(&schema);
    let payload = serde_json::to_string(&prep_rows(rows, target))
        .map_err(|e| ApiError::Internal(e.into()))?;

    let listing = connector
        .execute(
            conn,
            CommandMethod::Get,
            &format!("get msg client where topic = {}", TOPIC),
        )
        .await?;
    let listing = reply_text(&listing);
    if !listing.contains(NO_SUBSCRIPTIONS) {
        let id = parse_client_id(&listing).ok_or_else(|| {
            ApiError::Node(format!("Unexpected message client listing: {}", listing.trim()))
        })?;
        tracing::info!("Replacing message client {} on {}", id, conn);
        connector
            .execute(conn, CommandMethod::Post, &format!("exit msg client {}", id))
            .await?;
    }

    connector
        .execute(conn, CommandMethod::Post, &client_command)
        .await?;
    connector.post_payload(conn, "data", TOPIC, payload).await?;

    tracing::info!(
        "Sent {} rows to {}.{} through {}",
        rows.len(),
        target.dbms.trim(),
        target.table.trim(),
        conn
    );
    connector
        .execute(conn, CommandMethod::Get, "get streaming")
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::anylog::fake::FakeConnector;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Map<String, Value>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_infer_schema_uses_first_non_null_value() {
        let data = rows(json!([
            {"device": "pump", "reading": null, "count": 3},
            {"reading": 1.5, "ok": true, "count": 4},
            {"note": null}
        ]));
        assert_eq!(
            infer_schema(&data),
            vec![
                ("device".to_string(), "str"),
                ("reading".to_string(), "float"),
                ("count".to_string(), "int"),
                ("ok".to_string(), "bool"),
                ("note".to_string(), "str"),
            ]
        );
    }

    #[test]
    fn test_msg_client_command() {
        let schema = vec![("value".to_string(), "int"), ("device".to_string(), "str")];
        assert_eq!(
            msg_client_command(&schema),
            "run msg client where broker=rest and user-agent=anylog and log=false and topic=(name=new-data and dbms=\"bring [dbms]\" and table=\"bring [table]\" and column.value=(type=int and value=bring [value]) and column.device=(type=str and value=bring [device]))"
        );
    }

    #[test]
    fn test_parse_client_id() {
        assert_eq!(parse_client_id("Client ID: 3\nBroker: rest\n"), Some(3));
        assert_eq!(parse_client_id("  Subscription: 12 \n"), Some(12));
        assert_eq!(parse_client_id("garbage"), None);
        assert_eq!(parse_client_id(""), None);
    }

    #[tokio::test]
    async fn test_add_data_creates_client_when_none_exists() {
        let connector = FakeConnector::with_replies(vec![
            ("get msg client", "No message client subscriptions"),
            ("get streaming", r#"{"new-data": {"rows": 2}}"#),
        ]);
        let data = rows(json!([{"value": 1}, {"value": 2}]));

        let reply = add_data(
            &connector,
            "10.0.0.1:32049",
            &DbConnection::new("opcua_demo", "t20"),
            &data,
        )
        .await
        .unwrap();
        assert_eq!(reply.data["new-data"]["rows"], 2);

        let commands = connector.commands();
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[0], "get msg client where topic = new-data");
        assert!(commands[1].starts_with("run msg client where broker=rest"));
        assert_eq!(commands[2], "data");
        assert_eq!(commands[3], "get streaming");

        let payloads = connector.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].0, "new-data");
        let sent: Value = serde_json::from_str(&payloads[0].1).unwrap();
        assert_eq!(
            sent,
            json!([
                {"value": 1, "dbms": "opcua_demo", "table": "t20"},
                {"value": 2, "dbms": "opcua_demo", "table": "t20"}
            ])
        );
    }

    #[tokio::test]
    async fn test_add_data_replaces_existing_client() {
        let connector = FakeConnector::with_replies(vec![("get msg client", "Client ID: 7\nTopic: new-data")]);
        let data = rows(json!([{"value": 1}]));

        add_data(
            &connector,
            "10.0.0.1:32049",
            &DbConnection::new("opcua_demo", "t20"),
            &data,
        )
        .await
        .unwrap();

        let commands = connector.commands();
        assert_eq!(commands[1], "exit msg client 7");
        assert!(commands[2].starts_with("run msg client"));
    }

    #[tokio::test]
    async fn test_add_data_rejects_bad_input_before_contacting_node() {
        let connector = FakeConnector::default();
        let target = DbConnection::new("opcua_demo", "t20");

        for (target, data) in [
            (target.clone(), rows(json!([]))),
            (DbConnection::new(" ", "t20"), rows(json!([{"value": 1}]))),
            (target.clone(), rows(json!([{"bad key": 1}]))),
            (target.clone(), rows(json!([{"table": "x"}]))),
        ] {
            let err = add_data(&connector, "10.0.0.1:32049", &target, &data)
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(_)));
        }
        assert!(connector.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_client_listing_is_a_node_error() {
        let connector = FakeConnector::with_replies(vec![("get msg client", "something else")]);
        let err = add_data(
            &connector,
            "10.0.0.1:32049",
            &DbConnection::new("opcua_demo", "t20"),
            &rows(json!([{"value": 1}])),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Node(_)));
    }
}
