//! Creating a policy and publishing it to the blockchain
//!
//! The node keeps the policy in a local variable named after it, looks up
//! the master node, inserts the policy and reads it back.

use contracts::shared::anylog::{CommandMethod, NodeResponse, Policy};
use serde_json::Value;

use super::connector::NodeConnector;
use crate::shared::error::{ApiError, ApiResult};

const MASTER_VARIABLE: &str = "mnode";

fn is_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Attribute value as the node's command language expects it
fn render_value(key: &str, value: &Value) -> ApiResult<String> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() || text.contains('"') {
                return Err(ApiError::bad_request(format!(
                    "Policy attribute '{}' has an unusable value",
                    key
                )));
            }
            if text.contains(char::is_whitespace) {
                Ok(format!("\"{}\"", text))
            } else {
                Ok(text.to_string())
            }
        }
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err(ApiError::bad_request(format!(
            "Policy attribute '{}' must be a string, number or boolean",
            key
        ))),
    }
}

/// `<name> = create policy <name> where k = v and ...`
pub fn create_policy_command(policy: &Policy) -> ApiResult<String> {
    let name = policy.name.trim();
    if !is_identifier(name) {
        return Err(ApiError::bad_request(
            "Policy name must contain only letters, digits and '_'",
        ));
    }
    if policy.data.is_empty() {
        return Err(ApiError::bad_request("Policy needs at least one attribute"));
    }

    let mut pairs = Vec::with_capacity(policy.data.len());
    for (key, value) in &policy.data {
        let key = key.trim();
        if !is_identifier(key) {
            return Err(ApiError::bad_request(format!(
                "Policy attribute '{}' is not a valid name",
                key
            )));
        }
        pairs.push(format!("{} = {}", key, render_value(key, value)?));
    }

    Ok(format!(
        "{name} = create policy {name} where {}",
        pairs.join(" and ")
    ))
}

/// Runs the whole submission and returns the node's `blockchain get <name>`
pub async fn submit_policy(
    connector: &dyn NodeConnector,
    conn: &str,
    policy: &Policy,
) -> ApiResult<NodeResponse> {
    let create = create_policy_command(policy)?;
    let name = policy.name.trim();

    connector.execute(conn, CommandMethod::Post, &create).await?;
    let created = connector
        .execute(conn, CommandMethod::Get, &format!("get !{}", name))
        .await?;
    tracing::debug!("Policy {} staged on {}: {:?}", name, conn, created.data);

    connector
        .execute(
            conn,
            CommandMethod::Post,
            &format!("{} = blockchain get master bring.ip_port", MASTER_VARIABLE),
        )
        .await?;
    let master = connector
        .execute(conn, CommandMethod::Get, &format!("get !{}", MASTER_VARIABLE))
        .await?;
    tracing::debug!("Master node for {}: {:?}", conn, master.data);

    connector
        .execute(
            conn,
            CommandMethod::Post,
            &format!(
                "blockchain insert where policy = !{} and local = true and master = !{}",
                name, MASTER_VARIABLE
            ),
        )
        .await?;

    tracing::info!("Policy {} submitted through {}", name, conn);
    connector
        .execute(conn, CommandMethod::Get, &format!("blockchain get {}", name))
        .await
}
