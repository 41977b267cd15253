use contracts::shared::api::{ApiData, ErrorBody};
use serde::{de::DeserializeOwned, Serialize};

use super::api_utils::{api_base, api_url, normalize_base};
use super::error::ClientError;
use crate::system::auth::storage::SessionStore;

/// Backend address, HTTP client and session store
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: &str, session: SessionStore) -> Self {
        Self {
            base_url: normalize_base(base_url),
            http: reqwest::Client::new(),
            session,
        }
    }

    /// Base URL from `ANYLOG_CONSOLE_API_URL`, falling back to the default
    pub fn from_env(session: SessionStore) -> Self {
        Self::new(&api_base(), session)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// POST without credentials
    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(api_url(&self.base_url, path)).json(body);
        self.send(path, request).await
    }

    /// POST with the stored token; fails with `NotAuthenticated` before
    /// any request when there is no session
    pub(crate) async fn post_auth<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.session.access_token()?;
        let request = self
            .http
            .post(api_url(&self.base_url, path))
            .bearer_auth(token)
            .json(body);
        self.send(path, request).await
    }

    /// POST that carries the token only when a session exists
    pub(crate) async fn post_optional_auth<B, T>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http.post(api_url(&self.base_url, path)).json(body);
        if let Ok(token) = self.session.access_token() {
            request = request.bearer_auth(token);
        }
        self.send(path, request).await
    }

    async fn send<T>(&self, path: &str, request: reqwest::RequestBuilder) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(|e| {
            tracing::error!("{} failed: {}", path, e);
            ClientError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.detail)
                .unwrap_or(text);
            tracing::warn!("{} -> {}: {}", path, status.as_u16(), detail);
            return Err(ClientError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let envelope = response.json::<ApiData<T>>().await?;
        Ok(envelope.data)
    }
}
