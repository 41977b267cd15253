use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Address of an AnyLog node, `ip:port`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub conn: String,
}

impl Connection {
    pub fn new(conn: impl Into<String>) -> Self {
        Self { conn: conn.into() }
    }
}

/// HTTP method used to deliver a command to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommandMethod {
    #[default]
    Get,
    Post,
}

impl CommandMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandMethod::Get => "GET",
            CommandMethod::Post => "POST",
        }
    }

    /// Case-insensitive parse of `GET` / `POST`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(CommandMethod::Get),
            "POST" => Some(CommandMethod::Post),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    #[serde(rename = "type")]
    pub method: String,
    pub cmd: String,
}

impl Command {
    pub fn get(cmd: impl Into<String>) -> Self {
        Self {
            method: CommandMethod::Get.as_str().to_string(),
            cmd: cmd.into(),
        }
    }

    pub fn post(cmd: impl Into<String>) -> Self {
        Self {
            method: CommandMethod::Post.as_str().to_string(),
            cmd: cmd.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCommandRequest {
    pub conn: Connection,
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Json,
    Text,
}

/// Reply of a node: parsed JSON, or the raw body as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeResponse {
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    pub data: Value,
}

impl NodeResponse {
    /// JSON when the body parses, text otherwise
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self {
                kind: ResponseKind::Json,
                data: value,
            },
            Err(_) => Self {
                kind: ResponseKind::Text,
                data: Value::String(body.to_string()),
            },
        }
    }

    pub fn is_json(&self) -> bool {
        self.kind == ResponseKind::Json
    }
}

/// Keys kept from each `get monitored operators` entry
pub const MONITORED_KEYS: &[&str] = &[
    "Node",
    "node name",
    "operational time",
    "elapsed time",
    "new rows",
    "total rows",
    "Free Space Percent",
    "CPU Percent",
    "Packets Recv",
    "Packets Sent",
    "Network Error",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_response_from_body() {
        let json = NodeResponse::from_body(r#"{"a": 1}"#);
        assert!(json.is_json());
        assert_eq!(json.data["a"], 1);

        let text = NodeResponse::from_body("Status: running");
        assert_eq!(text.kind, ResponseKind::Text);
        assert_eq!(text.data, Value::String("Status: running".into()));
    }

    #[test]
    fn test_command_method_parse() {
        assert_eq!(CommandMethod::parse("get"), Some(CommandMethod::Get));
        assert_eq!(CommandMethod::parse(" POST "), Some(CommandMethod::Post));
        assert_eq!(CommandMethod::parse("PUT"), None);
    }

    #[test]
    fn test_command_wire_shape() {
        let json = serde_json::to_value(Command::get("get status")).unwrap();
        assert_eq!(json["type"], "GET");
        assert_eq!(json["cmd"], "get status");
    }
}
