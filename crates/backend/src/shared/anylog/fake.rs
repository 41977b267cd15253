use async_trait::async_trait;
use contracts::shared::anylog::{CommandMethod, NodeResponse};
use std::sync::Mutex;

use super::connector::NodeConnector;
use crate::shared::error::ApiError;

/// Node address the fake treats as down
pub const UNREACHABLE: &str = "unreachable:1";

/// Answers from canned bodies keyed by command prefix and remembers every call
#[derive(Default)]
pub struct FakeConnector {
    pub replies: Vec<(&'static str, &'static str)>,
    pub calls: Mutex<Vec<(String, CommandMethod, String)>>,
    /// `(topic, payload)` of every `post_payload`
    pub payloads: Mutex<Vec<(String, String)>>,
}

impl FakeConnector {
    pub fn with_replies(replies: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            replies,
            ..Default::default()
        }
    }

    /// Commands in call order
    pub fn commands(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, command)| command.clone())
            .collect()
    }

    fn answer(&self, conn: &str, method: CommandMethod, command: &str) -> Result<NodeResponse, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((conn.to_string(), method, command.to_string()));
        if conn == UNREACHABLE {
            return Err(ApiError::Node("connection refused".to_string()));
        }
        let body = self
            .replies
            .iter()
            .find(|(cmd, _)| command.starts_with(cmd))
            .map(|(_, body)| *body)
            .unwrap_or("Command executed");
        Ok(NodeResponse::from_body(body))
    }
}

#[async_trait]
impl NodeConnector for FakeConnector {
    async fn execute(
        &self,
        conn: &str,
        method: CommandMethod,
        command: &str,
    ) -> Result<NodeResponse, ApiError> {
        self.answer(conn, method, command)
    }

    async fn post_payload(
        &self,
        conn: &str,
        command: &str,
        topic: &str,
        payload: String,
    ) -> Result<NodeResponse, ApiError> {
        self.payloads
            .lock()
            .unwrap()
            .push((topic.to_string(), payload));
        self.answer(conn, CommandMethod::Post, command)
    }
}
