use contracts::domain::a003_node_history::aggregate::NodeHistoryEntry;
use contracts::shared::api::ApiMessage;
use serde_json::json;

use crate::shared::api_client::ApiClient;
use crate::shared::error::ClientError;

/// Newest first, at most 100 entries
pub async fn list(client: &ApiClient) -> Result<Vec<NodeHistoryEntry>, ClientError> {
    client.post_auth("/auth/get-node-history/", &json!({})).await
}

pub async fn clear(client: &ApiClient) -> Result<ApiMessage, ClientError> {
    client
        .post_auth("/auth/clear-node-history/", &json!({}))
        .await
}
