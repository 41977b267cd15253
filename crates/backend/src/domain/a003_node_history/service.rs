use contracts::domain::a003_node_history::aggregate::{NodeHistoryEntry, NODE_HISTORY_LIMIT};
use sea_orm::DatabaseConnection;

use super::repository;
use crate::shared::error::ApiResult;

/// Remember that the user sent a command to `node`
pub async fn record(db: &DatabaseConnection, user_id: &str, node: &str) -> ApiResult<()> {
    let node = node.trim();
    if node.is_empty() {
        return Ok(());
    }
    repository::insert(db, user_id, node).await?;
    Ok(())
}

pub async fn list(db: &DatabaseConnection, user_id: &str) -> ApiResult<Vec<NodeHistoryEntry>> {
    Ok(repository::list_recent(db, user_id, NODE_HISTORY_LIMIT).await?)
}

pub async fn clear(db: &DatabaseConnection, user_id: &str) -> ApiResult<u64> {
    Ok(repository::clear(db, user_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    #[tokio::test]
    async fn test_newest_first_and_capped() {
        let db = connect_in_memory().await.unwrap();
        for i in 0..105 {
            record(&db, "u1", &format!("10.0.0.{}:32049", i)).await.unwrap();
        }
        record(&db, "u2", "other").await.unwrap();

        let entries = list(&db, "u1").await.unwrap();
        assert_eq!(entries.len(), NODE_HISTORY_LIMIT as usize);
        assert_eq!(entries[0].node, "10.0.0.104:32049");
        assert!(entries.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[tokio::test]
    async fn test_clear_only_touches_own_entries() {
        let db = connect_in_memory().await.unwrap();
        record(&db, "u1", "a").await.unwrap();
        record(&db, "u1", "b").await.unwrap();
        record(&db, "u2", "c").await.unwrap();
        record(&db, "u1", "  ").await.unwrap();

        assert_eq!(clear(&db, "u1").await.unwrap(), 2);
        assert!(list(&db, "u1").await.unwrap().is_empty());
        assert_eq!(list(&db, "u2").await.unwrap().len(), 1);
    }
}
