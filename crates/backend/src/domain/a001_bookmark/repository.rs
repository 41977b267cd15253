use contracts::domain::a001_bookmark::aggregate::Bookmark;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::shared::format::now_rfc3339;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_bookmarks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub node: String,
    pub description: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Bookmark {
    fn from(m: Model) -> Self {
        Bookmark {
            node: m.node,
            description: m.description,
            created_at: m.created_at,
        }
    }
}

pub async fn list_by_user(db: &DatabaseConnection, user_id: &str) -> anyhow::Result<Vec<Bookmark>> {
    let items = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Node)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn insert(db: &DatabaseConnection, user_id: &str, node: &str) -> anyhow::Result<Bookmark> {
    let active = ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        node: Set(node.to_string()),
        description: Set(String::new()),
        created_at: Set(now_rfc3339()),
    };
    let model = active.insert(db).await?;
    Ok(model.into())
}

pub async fn update_description(
    db: &DatabaseConnection,
    user_id: &str,
    node: &str,
    description: &str,
) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::Description, Expr::value(description))
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Node.eq(node))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn delete(db: &DatabaseConnection, user_id: &str, node: &str) -> anyhow::Result<bool> {
    let result = Entity::delete_many()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Node.eq(node))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
