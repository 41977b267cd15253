use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

const JWT_SECRET_KEY: &str = "jwt_secret";

/// Generate JWT access token; the token is also the session identifier
pub async fn generate_access_token(
    db: &DatabaseConnection,
    user_id: &str,
    email: &str,
    lifetime_hours: i64,
) -> Result<String> {
    let now = Utc::now();
    let exp = (now + chrono::Duration::hours(lifetime_hours)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = TokenClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        jti: uuid::Uuid::new_v4().to_string(),
        exp,
        iat,
    };

    let secret = get_jwt_secret(db).await?;
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")?;

    Ok(token)
}

/// Validate JWT token and extract claims; revoked tokens are rejected
pub async fn validate_token(db: &DatabaseConnection, token: &str) -> Result<TokenClaims> {
    let secret = get_jwt_secret(db).await?;

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    if is_revoked(db, token).await? {
        anyhow::bail!("Token has been revoked");
    }

    Ok(token_data.claims)
}

/// Mark a token as unusable (logout)
pub async fn revoke_token(db: &DatabaseConnection, token: &str) -> Result<()> {
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT OR IGNORE INTO sys_revoked_tokens (token_hash, revoked_at) VALUES (?, ?)",
        [hash_token(token).into(), crate::shared::format::now_rfc3339().into()],
    ))
    .await
    .context("Failed to revoke token")?;
    Ok(())
}

async fn is_revoked(db: &DatabaseConnection, token: &str) -> Result<bool> {
    let row = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT token_hash FROM sys_revoked_tokens WHERE token_hash = ?",
            [hash_token(token).into()],
        ))
        .await?;
    Ok(row.is_some())
}

/// Get or create JWT secret from database
pub async fn get_jwt_secret(db: &DatabaseConnection) -> Result<String> {
    if let Some(secret) = get_jwt_secret_from_db(db).await? {
        return Ok(secret);
    }

    // first writer wins; re-read so concurrent callers agree on one secret
    save_jwt_secret_to_db(db, &generate_jwt_secret()).await?;
    get_jwt_secret_from_db(db)
        .await?
        .ok_or_else(|| anyhow::anyhow!("JWT secret missing after insert"))
}

/// Generate a cryptographically secure JWT secret (256 bits)
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

async fn get_jwt_secret_from_db(db: &DatabaseConnection) -> Result<Option<String>> {
    let result = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            [JWT_SECRET_KEY.into()],
        ))
        .await?;

    match result {
        Some(row) => {
            let secret: String = row.try_get("", "value")?;
            Ok(Some(secret))
        }
        None => Ok(None),
    }
}

async fn save_jwt_secret_to_db(db: &DatabaseConnection, secret: &str) -> Result<()> {
    let now = crate::shared::format::now_rfc3339();

    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT OR IGNORE INTO sys_settings (key, value, description, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            JWT_SECRET_KEY.into(),
            secret.to_string().into(),
            "Auto-generated JWT secret for authentication".into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await?;

    Ok(())
}

pub fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
