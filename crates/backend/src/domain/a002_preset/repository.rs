use contracts::domain::a002_preset::aggregate::{Preset, PresetGroup};
use contracts::shared::anylog::CommandMethod;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::shared::format::now_rfc3339;

/// a002_preset_groups
pub mod group {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a002_preset_groups")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub user_id: String,
        pub group_name: String,
        pub created_at: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// a002_presets
pub mod preset {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a002_presets")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub user_id: String,
        pub group_id: String,
        pub command: String,
        #[sea_orm(column_name = "type")]
        pub method: String,
        pub button: String,
        pub created_at: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<group::Model> for PresetGroup {
    fn from(m: group::Model) -> Self {
        PresetGroup {
            id: m.id,
            group_name: m.group_name,
            created_at: m.created_at,
        }
    }
}

impl From<preset::Model> for Preset {
    fn from(m: preset::Model) -> Self {
        Preset {
            id: m.id,
            group_id: m.group_id,
            command: m.command,
            // rows are validated on write; fall back to GET for hand-edited data
            method: CommandMethod::parse(&m.method).unwrap_or_default(),
            button: m.button,
            created_at: m.created_at,
        }
    }
}

// ============================================================================
// Groups
// ============================================================================

pub async fn list_groups<C: ConnectionTrait>(db: &C, user_id: &str) -> anyhow::Result<Vec<PresetGroup>> {
    let items = group::Entity::find()
        .filter(group::Column::UserId.eq(user_id))
        .order_by_asc(group::Column::CreatedAt)
        .order_by_asc(group::Column::GroupName)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_group<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    group_id: &str,
) -> anyhow::Result<Option<PresetGroup>> {
    let result = group::Entity::find_by_id(group_id.to_string())
        .filter(group::Column::UserId.eq(user_id))
        .one(db)
        .await?;
    Ok(result.map(Into::into))
}

pub async fn find_group_by_name<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    group_name: &str,
) -> anyhow::Result<Option<PresetGroup>> {
    let result = group::Entity::find()
        .filter(group::Column::UserId.eq(user_id))
        .filter(group::Column::GroupName.eq(group_name))
        .one(db)
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert_group<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    group_name: &str,
) -> anyhow::Result<PresetGroup> {
    let active = group::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        group_name: Set(group_name.to_string()),
        created_at: Set(now_rfc3339()),
    };
    Ok(active.insert(db).await?.into())
}

/// Deletes the presets of the group, then the group; returns the number of
/// presets removed
pub async fn delete_group_cascade<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    group_id: &str,
) -> anyhow::Result<u64> {
    let presets = preset::Entity::delete_many()
        .filter(preset::Column::UserId.eq(user_id))
        .filter(preset::Column::GroupId.eq(group_id))
        .exec(db)
        .await?;

    group::Entity::delete_many()
        .filter(group::Column::UserId.eq(user_id))
        .filter(group::Column::Id.eq(group_id))
        .exec(db)
        .await?;

    Ok(presets.rows_affected)
}

// ============================================================================
// Presets
// ============================================================================

pub async fn list_presets<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    group_id: &str,
) -> anyhow::Result<Vec<Preset>> {
    let items = preset::Entity::find()
        .filter(preset::Column::UserId.eq(user_id))
        .filter(preset::Column::GroupId.eq(group_id))
        .order_by_asc(preset::Column::CreatedAt)
        .order_by_asc(preset::Column::Button)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn insert_preset<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    group_id: &str,
    command: &str,
    method: CommandMethod,
    button: &str,
) -> anyhow::Result<Preset> {
    let active = preset::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        group_id: Set(group_id.to_string()),
        command: Set(command.to_string()),
        method: Set(method.as_str().to_string()),
        button: Set(button.to_string()),
        created_at: Set(now_rfc3339()),
    };
    Ok(active.insert(db).await?.into())
}

/// Same button and command already stored in the group
pub async fn preset_exists<C: ConnectionTrait>(
    db: &C,
    group_id: &str,
    button: &str,
    command: &str,
) -> anyhow::Result<bool> {
    let found = preset::Entity::find()
        .filter(preset::Column::GroupId.eq(group_id))
        .filter(preset::Column::Button.eq(button))
        .filter(preset::Column::Command.eq(command))
        .one(db)
        .await?;
    Ok(found.is_some())
}

pub async fn delete_preset<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    preset_id: &str,
) -> anyhow::Result<bool> {
    let result = preset::Entity::delete_many()
        .filter(preset::Column::UserId.eq(user_id))
        .filter(preset::Column::Id.eq(preset_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
