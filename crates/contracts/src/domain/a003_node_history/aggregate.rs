use serde::{Deserialize, Serialize};

/// One command submission to a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeHistoryEntry {
    pub id: String,
    pub node: String,
    pub timestamp: String,
}

/// Cap applied to `get-node-history`
pub const NODE_HISTORY_LIMIT: u64 = 100;
