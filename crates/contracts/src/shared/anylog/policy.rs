use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::command::Connection;

/// Blockchain policy: `<name> = create policy <name> where k = v and ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub name: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Policy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Map::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// `/submit-policy/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPolicyRequest {
    pub conn: Connection,
    pub policy: Policy,
}
