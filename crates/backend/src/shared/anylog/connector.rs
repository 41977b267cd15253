use async_trait::async_trait;
use contracts::shared::anylog::{CommandMethod, NodeResponse};
use std::time::Duration;

use crate::shared::config::AnyLogConfig;
use crate::shared::error::ApiError;

/// Destination used for `run client () ...` queries
pub const NETWORK_DESTINATION: &str = "network";

const RUN_CLIENT_PREFIX: &str = "run client (";

/// Delivers one command to an AnyLog node and returns its parsed reply
#[async_trait]
pub trait NodeConnector: Send + Sync {
    async fn execute(
        &self,
        conn: &str,
        method: CommandMethod,
        command: &str,
    ) -> Result<NodeResponse, ApiError>;

    /// POSTs `command` with a `topic` header and `payload` as the body,
    /// as the node's REST message broker expects
    async fn post_payload(
        &self,
        conn: &str,
        command: &str,
        topic: &str,
        payload: String,
    ) -> Result<NodeResponse, ApiError>;
}

/// Splits a `run client (<dest>) <cmd>` wrapper into its destination and
/// the command the node should run
///
/// An empty selector means the whole network. Parentheses inside
/// `"..."` do not count. Commands without the wrapper are returned as
/// they are.
pub fn split_destination(command: &str) -> (Option<String>, String) {
    let trimmed = command.trim();
    let Some(rest) = trimmed.strip_prefix(RUN_CLIENT_PREFIX) else {
        return (None, trimmed.to_string());
    };

    // selectors may contain nested parentheses; quoted values are opaque
    let mut depth = 1usize;
    let mut in_quotes = false;
    let mut close = None;
    for (idx, ch) in rest.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            _ if in_quotes => {}
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(idx);
                    break;
                }
            }
            _ => {}
        }
    }

    let Some(close) = close else {
        return (None, trimmed.to_string());
    };

    let selector = rest[..close].trim();
    let remainder = rest[close + 1..].trim().to_string();
    let destination = if selector.is_empty() {
        NETWORK_DESTINATION.to_string()
    } else {
        selector.to_string()
    };
    (Some(destination), remainder)
}

/// reqwest-backed connector talking to `http://<conn>`
pub struct HttpNodeConnector {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpNodeConnector {
    pub fn new(config: &AnyLogConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }

    async fn send(
        &self,
        conn: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<NodeResponse, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Node(format!("Failed to reach node {}: {}", conn, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Node(format!("Failed to read reply from {}: {}", conn, e)))?;

        if !status.is_success() {
            tracing::warn!("Node {} answered {}: {}", conn, status, body);
            let detail = if body.trim().is_empty() {
                format!("Node {} answered HTTP {}", conn, status.as_u16())
            } else {
                body.trim().to_string()
            };
            return Err(ApiError::Node(detail));
        }

        let preview: String = body.chars().take(200).collect();
        tracing::debug!("Node reply preview: {}", preview);

        Ok(NodeResponse::from_body(&body))
    }
}

#[async_trait]
impl NodeConnector for HttpNodeConnector {
    async fn execute(
        &self,
        conn: &str,
        method: CommandMethod,
        command: &str,
    ) -> Result<NodeResponse, ApiError> {
        let (destination, command) = split_destination(command);
        let url = format!("http://{}", conn.trim());

        tracing::info!(
            "AnyLog {} {} command={:?} destination={:?}",
            method.as_str(),
            url,
            command,
            destination
        );

        let request = match method {
            CommandMethod::Get => self.client.get(&url),
            CommandMethod::Post => self.client.post(&url),
        };
        let mut request = request
            .header("User-Agent", &self.user_agent)
            .header("command", command.as_str());
        if let Some(destination) = destination.as_deref() {
            request = request.header("destination", destination);
        }

        self.send(conn, request).await
    }

    async fn post_payload(
        &self,
        conn: &str,
        command: &str,
        topic: &str,
        payload: String,
    ) -> Result<NodeResponse, ApiError> {
        let url = format!("http://{}", conn.trim());
        tracing::info!(
            "AnyLog POST {} command={:?} topic={:?} payload={} bytes",
            url,
            command,
            topic,
            payload.len()
        );

        let request = self
            .client
            .post(&url)
            .header("User-Agent", &self.user_agent)
            .header("command", command)
            .header("topic", topic)
            .header("Content-Type", "application/json")
            .body(payload);

        self.send(conn, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::query_builder::{
        build_query, ComparisonOp, NodeFilter, NodeSelector, QuerySpec,
    };

    #[test]
    fn test_network_query_destination() {
        let (dest, cmd) =
            split_destination("run client () sql opcua_demo format = table \"SELECT 1 FROM t11\"");
        assert_eq!(dest.as_deref(), Some("network"));
        assert_eq!(cmd, "sql opcua_demo format = table \"SELECT 1 FROM t11\"");
    }

    #[test]
    fn test_explicit_destination() {
        let (dest, cmd) = split_destination("run client (10.0.0.1:32148) get status");
        assert_eq!(dest.as_deref(), Some("10.0.0.1:32148"));
        assert_eq!(cmd, "get status");
    }

    #[test]
    fn test_selector_with_nested_parentheses() {
        let (dest, cmd) = split_destination(
            "run client (blockchain get operator where name=\"op(1)\" bring.ip_port) sql db format = json \"SELECT a FROM t\"",
        );
        assert_eq!(
            dest.as_deref(),
            Some("blockchain get operator where name=\"op(1)\" bring.ip_port")
        );
        assert_eq!(cmd, "sql db format = json \"SELECT a FROM t\"");
    }

    #[test]
    fn test_plain_command_has_no_destination() {
        let (dest, cmd) = split_destination("  get status  ");
        assert!(dest.is_none());
        assert_eq!(cmd, "get status");
    }

    #[test]
    fn test_parentheses_inside_quoted_selector_values() {
        let (dest, cmd) = split_destination(
            "run client (blockchain get operator where name=\"op)1\" bring.ip_port) sql db format = json \"SELECT a FROM t\"",
        );
        assert_eq!(
            dest.as_deref(),
            Some("blockchain get operator where name=\"op)1\" bring.ip_port")
        );
        assert_eq!(cmd, "sql db format = json \"SELECT a FROM t\"");
    }

    #[test]
    fn test_built_command_splits_at_its_own_selector() {
        let mut spec = QuerySpec::new("opcua_demo", "t11");
        spec.columns = vec!["value".to_string()];
        spec.node_selector = NodeSelector {
            target_nodes: true,
            filters: vec![
                NodeFilter::new("name", ComparisonOp::Eq, "op(1)"),
                NodeFilter::new("company", ComparisonOp::Eq, "Acme (EU))"),
            ],
        };
        let command = build_query(&spec, &[]).into_command().unwrap();

        let (dest, cmd) = split_destination(&command);
        assert_eq!(
            dest.as_deref(),
            Some("blockchain get operator where name=\"op(1)\" and company=\"Acme (EU))\" bring.ip_port")
        );
        assert_eq!(cmd, "sql opcua_demo format = json \"SELECT value FROM t11\"");
    }

    #[test]
    fn test_unterminated_selector_is_left_alone() {
        let (dest, cmd) = split_destination("run client (10.0.0.1 get status");
        assert!(dest.is_none());
        assert_eq!(cmd, "run client (10.0.0.1 get status");
    }
}
