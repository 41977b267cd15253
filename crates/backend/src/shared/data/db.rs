use sea_orm::{
    ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::path::Path;

use crate::shared::config::{self, Config};

/// Tables owned by the domain modules (bookmarks, presets, node history)
const DOMAIN_SCHEMA: &[(&str, &str)] = &[
    (
        "a001_bookmarks",
        r#"
        CREATE TABLE IF NOT EXISTS a001_bookmarks (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL,
            node TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            UNIQUE (user_id, node)
        );
        "#,
    ),
    (
        "a002_preset_groups",
        r#"
        CREATE TABLE IF NOT EXISTS a002_preset_groups (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL,
            group_name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE (user_id, group_name)
        );
        "#,
    ),
    (
        "a002_presets",
        r#"
        CREATE TABLE IF NOT EXISTS a002_presets (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL,
            group_id TEXT NOT NULL,
            command TEXT NOT NULL,
            type TEXT NOT NULL DEFAULT 'GET',
            button TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "a003_node_history",
        r#"
        CREATE TABLE IF NOT EXISTS a003_node_history (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL,
            node TEXT NOT NULL,
            timestamp TEXT NOT NULL
        );
        "#,
    ),
];

fn build_sqlite_url(path: &Path) -> String {
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Open the SQLite file named in the config and make sure the domain tables exist
pub async fn initialize_database(cfg: &Config) -> anyhow::Result<DatabaseConnection> {
    let db_file = config::get_database_path(cfg)?;
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = build_sqlite_url(&db_file);
    tracing::info!("Opening database: {}", db_url);
    let conn = Database::connect(&db_url).await?;

    ensure_schema(&conn).await?;
    Ok(conn)
}

pub async fn ensure_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (table, sql) in DOMAIN_SCHEMA {
        tracing::debug!("Ensuring table {}", table);
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
    }
    Ok(())
}

/// True when `err` carries a UNIQUE constraint failure from the database
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<DbErr>().and_then(DbErr::sql_err),
        Some(SqlErr::UniqueConstraintViolation(_))
    )
}

/// Fresh in-memory database with the full schema, one per test
#[cfg(test)]
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut options = sea_orm::ConnectOptions::new("sqlite::memory:".to_string());
    // every pooled connection would get its own empty database
    options.max_connections(1).sqlx_logging(false);
    let conn = Database::connect(options).await?;

    crate::system::initialization::apply_auth_migration(&conn).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}
