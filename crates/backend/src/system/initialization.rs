use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

/// Schema of the accounts, settings and revoked tokens tables
const AUTH_MIGRATION: &str = r#"
-- accounts
CREATE TABLE IF NOT EXISTS sys_users (
    id TEXT PRIMARY KEY NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    firstname TEXT NOT NULL,
    lastname TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- key/value settings, holds the JWT secret
CREATE TABLE IF NOT EXISTS sys_settings (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- access tokens ended by logout
CREATE TABLE IF NOT EXISTS sys_revoked_tokens (
    token_hash TEXT PRIMARY KEY NOT NULL,
    revoked_at TEXT NOT NULL
);
"#;

/// Apply authentication system migration
pub async fn apply_auth_migration(conn: &DatabaseConnection) -> Result<()> {
    // Execute each statement separately (SQLite doesn't support execute_batch in sea-orm)
    for (idx, statement) in AUTH_MIGRATION.split(';').enumerate() {
        let cleaned: String = statement
            .lines()
            .filter(|line| {
                let trimmed_line = line.trim();
                !trimmed_line.is_empty() && !trimmed_line.starts_with("--")
            })
            .collect::<Vec<_>>()
            .join("\n");

        let trimmed = cleaned.trim();
        if trimmed.is_empty() {
            continue;
        }

        let preview = trimmed
            .chars()
            .take(60)
            .collect::<String>()
            .replace('\n', " ");
        tracing::debug!("Executing migration statement #{}: {}...", idx, preview);

        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("{};", trimmed),
        ))
        .await
        .with_context(|| format!("Failed to execute auth migration statement #{}", idx))?;
    }

    tracing::info!("Auth system migration applied successfully");
    Ok(())
}
