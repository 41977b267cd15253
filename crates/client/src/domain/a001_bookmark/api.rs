use contracts::domain::a001_bookmark::aggregate::{
    Bookmark, BookmarkNodeRequest, UpdateBookmarkDescriptionRequest,
};
use contracts::shared::api::ApiMessage;
use serde_json::json;

use crate::shared::api_client::ApiClient;
use crate::shared::api_utils::require;
use crate::shared::error::ClientError;

/// Returns the backend message ("Bookmark added" / "Bookmark already exists")
pub async fn bookmark_node(client: &ApiClient, node: &str) -> Result<ApiMessage, ClientError> {
    let request = BookmarkNodeRequest {
        node: require("node", node)?.to_string(),
    };
    client.post_auth("/auth/bookmark-node/", &request).await
}

pub async fn list(client: &ApiClient) -> Result<Vec<Bookmark>, ClientError> {
    client
        .post_auth("/auth/get-bookmarked-nodes/", &json!({}))
        .await
}

pub async fn delete(client: &ApiClient, node: &str) -> Result<ApiMessage, ClientError> {
    let request = BookmarkNodeRequest {
        node: require("node", node)?.to_string(),
    };
    client
        .post_auth("/auth/delete-bookmarked-node/", &request)
        .await
}

pub async fn update_description(
    client: &ApiClient,
    node: &str,
    description: &str,
) -> Result<ApiMessage, ClientError> {
    let request = UpdateBookmarkDescriptionRequest {
        node: require("node", node)?.to_string(),
        description: description.to_string(),
    };
    client
        .post_auth("/auth/update-bookmark-description/", &request)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::storage::SessionStore;

    fn offline_client(dir: &tempfile::TempDir) -> ApiClient {
        // nothing listens here; any request would fail with Transport
        ApiClient::new("http://127.0.0.1:9", SessionStore::new(dir.path().join("session.json")))
    }

    #[tokio::test]
    async fn test_missing_session_is_reported_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let client = offline_client(&dir);

        assert!(matches!(list(&client).await, Err(ClientError::NotAuthenticated)));
        assert!(matches!(
            bookmark_node(&client, "10.0.0.1:32049").await,
            Err(ClientError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_blank_node_is_rejected_locally() {
        let dir = tempfile::tempdir().unwrap();
        let client = offline_client(&dir);

        assert!(matches!(
            delete(&client, "  ").await,
            Err(ClientError::MissingField("node"))
        ));
    }
}
