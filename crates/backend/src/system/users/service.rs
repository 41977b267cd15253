use contracts::system::auth::SignupRequest;
use contracts::system::users::User;
use sea_orm::DatabaseConnection;

use super::repository;
use crate::shared::error::{ApiError, ApiResult};
use crate::system::auth::password;

/// Register a new account
pub async fn signup(db: &DatabaseConnection, dto: SignupRequest) -> ApiResult<User> {
    let email = dto.email.trim().to_string();
    let firstname = dto.firstname.trim().to_string();
    let lastname = dto.lastname.trim().to_string();

    for (field, value) in [
        ("email", email.as_str()),
        ("password", dto.password.as_str()),
        ("firstname", firstname.as_str()),
        ("lastname", lastname.as_str()),
    ] {
        if value.is_empty() {
            return Err(ApiError::bad_request(format!("Field '{}' is required", field)));
        }
    }

    if !email.contains('@') {
        return Err(ApiError::bad_request("Invalid email format"));
    }

    password::validate_password_strength(&dto.password).map_err(ApiError::BadRequest)?;

    if repository::get_by_email(db, &email).await?.is_some() {
        return Err(ApiError::bad_request("User already exists"));
    }

    let password_hash = password::hash_password(&dto.password)?;
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        email,
        firstname,
        lastname,
        created_at: crate::shared::format::now_rfc3339(),
    };

    repository::create_with_password(db, &user, &password_hash).await?;
    tracing::info!("Created user {} ({})", user.email, user.id);

    Ok(user)
}

/// Verify user credentials; `None` when the email or password does not match
pub async fn verify_credentials(
    db: &DatabaseConnection,
    email: &str,
    password_value: &str,
) -> ApiResult<Option<User>> {
    let Some(user) = repository::get_by_email(db, email.trim()).await? else {
        return Ok(None);
    };

    let Some(hash) = repository::get_password_hash(db, &user.id).await? else {
        return Ok(None);
    };

    if password::verify_password(password_value, &hash) {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> ApiResult<Option<User>> {
    Ok(repository::get_by_id(db, id).await?)
}
