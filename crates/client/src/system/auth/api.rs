use contracts::shared::api::ApiMessage;
use contracts::system::auth::{LoginRequest, LoginResponse, SignupRequest, UserInfo};
use serde_json::json;

use super::storage::Session;
use crate::shared::api_client::ApiClient;
use crate::shared::api_utils::require;
use crate::shared::error::ClientError;

/// Register and sign in; the new session is persisted
pub async fn signup(client: &ApiClient, request: SignupRequest) -> Result<Session, ClientError> {
    require("email", &request.email)?;
    require("password", &request.password)?;
    require("firstname", &request.firstname)?;
    require("lastname", &request.lastname)?;

    let response: LoginResponse = client.post("/auth/signup/", &request).await?;
    let session = Session::from(response);
    client.session().save(&session)?;
    tracing::info!("Signed up as {}", session.user.email);
    Ok(session)
}

/// Login with email and password; the session is persisted
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<Session, ClientError> {
    let request = LoginRequest {
        email: require("email", email)?.to_string(),
        password: require("password", password)?.to_string(),
    };

    let response: LoginResponse = client.post("/auth/login/", &request).await?;
    let session = Session::from(response);
    client.session().save(&session)?;
    tracing::info!("Logged in as {}", session.user.email);
    Ok(session)
}

/// Revoke the token on the backend and forget the local session
///
/// A token the backend already rejects is dropped locally too.
pub async fn logout(client: &ApiClient) -> Result<(), ClientError> {
    let result: Result<ApiMessage, ClientError> = client.post_auth("/auth/logout/", &json!({})).await;
    match result {
        Ok(_) => client.session().clear(),
        Err(e @ ClientError::Status { status: 401, .. }) => {
            client.session().clear()?;
            Err(e)
        }
        Err(e) => Err(e),
    }
}

/// Get current user info
pub async fn get_user(client: &ApiClient) -> Result<UserInfo, ClientError> {
    client.post_auth("/auth/get-user/", &json!({})).await
}
