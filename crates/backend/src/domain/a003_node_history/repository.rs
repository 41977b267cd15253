use contracts::domain::a003_node_history::aggregate::NodeHistoryEntry;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};

use crate::shared::format::now_rfc3339;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_node_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub node: String,
    pub timestamp: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for NodeHistoryEntry {
    fn from(m: Model) -> Self {
        NodeHistoryEntry {
            id: m.id,
            node: m.node,
            timestamp: m.timestamp,
        }
    }
}

pub async fn insert(db: &DatabaseConnection, user_id: &str, node: &str) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        node: Set(node.to_string()),
        timestamp: Set(now_rfc3339()),
    };
    active.insert(db).await?;
    Ok(())
}

/// Newest first
pub async fn list_recent(
    db: &DatabaseConnection,
    user_id: &str,
    limit: u64,
) -> anyhow::Result<Vec<NodeHistoryEntry>> {
    let items = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::Timestamp)
        .limit(limit)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn clear(db: &DatabaseConnection, user_id: &str) -> anyhow::Result<u64> {
    let result = Entity::delete_many()
        .filter(Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
