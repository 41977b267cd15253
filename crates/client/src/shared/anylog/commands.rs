use contracts::shared::anylog::{
    AddDataRequest, ColumnInfo, Command, CommandMethod, Connection, DbConnection, NodeResponse,
    Policy, SendCommandRequest, SubmitPolicyRequest,
};
use contracts::shared::query_builder::{BuildOutcome, QuerySpec, QueryStatementBuilder};
use serde_json::{Map, Value};

use crate::shared::api_client::ApiClient;
use crate::shared::api_utils::require;
use crate::shared::error::ClientError;

/// Submit one command to a node through the backend
///
/// The session token is attached when present so the node lands in the
/// user's history.
pub async fn send_command(
    client: &ApiClient,
    conn: &str,
    method: CommandMethod,
    cmd: &str,
) -> Result<NodeResponse, ClientError> {
    let request = SendCommandRequest {
        conn: Connection::new(require("conn", conn)?),
        command: Command {
            method: method.as_str().to_string(),
            cmd: require("cmd", cmd)?.to_string(),
        },
    };
    client.post_optional_auth("/send-command/", &request).await
}

/// Addresses of the nodes `test network` reports as up
pub async fn get_network_nodes(client: &ApiClient, conn: &str) -> Result<Vec<String>, ClientError> {
    let request = Connection::new(require("conn", conn)?);
    client.post("/get-network-nodes/", &request).await
}

pub async fn monitor(client: &ApiClient, conn: &str) -> Result<Vec<Map<String, Value>>, ClientError> {
    let request = Connection::new(require("conn", conn)?);
    client.post("/monitor/", &request).await
}

/// Create `policy` on the node and publish it; returns the blockchain copy
pub async fn submit_policy(
    client: &ApiClient,
    conn: &str,
    policy: Policy,
) -> Result<NodeResponse, ClientError> {
    let conn = Connection::new(require("conn", conn)?);
    require("name", &policy.name)?;
    let request = SubmitPolicyRequest { conn, policy };
    client.post("/submit-policy/", &request).await
}

/// Stream JSON rows into `dbms.table`; returns the node's streaming report
pub async fn add_data(
    client: &ApiClient,
    conn: &str,
    dbms: &str,
    table: &str,
    data: Vec<Map<String, Value>>,
) -> Result<NodeResponse, ClientError> {
    let request = AddDataRequest {
        conn: Connection::new(require("conn", conn)?),
        dbconn: DbConnection::new(require("dbms", dbms)?, require("table", table)?),
        data,
    };
    if request.data.is_empty() {
        return Err(ClientError::MissingField("data"));
    }
    client.post("/add-data/", &request).await
}

/// Turns a build outcome into the command to send
pub fn statement_of(outcome: BuildOutcome) -> Result<String, ClientError> {
    match outcome {
        BuildOutcome::Ready { command } => Ok(command),
        other => {
            let reason = other.advisory().unwrap_or("Nothing to run");
            tracing::warn!("Query not sent: {}", reason);
            Err(ClientError::InvalidQuery(reason.to_string()))
        }
    }
}

/// Build a statement from the form state and run it on `conn`
pub async fn run_query(
    client: &ApiClient,
    conn: &str,
    spec: &QuerySpec,
    columns: &[ColumnInfo],
) -> Result<NodeResponse, ClientError> {
    let command = statement_of(QueryStatementBuilder::new(spec, columns).build())?;
    tracing::debug!("Running query: {}", command);
    send_command(client, conn, CommandMethod::Get, &command).await
}
