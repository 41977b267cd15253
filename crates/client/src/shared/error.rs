use thiserror::Error;

/// Error of every client call
#[derive(Debug, Error)]
pub enum ClientError {
    /// No stored session; raised before any request is made
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Field '{0}' is required")]
    MissingField(&'static str),
    /// Non-success reply, with the backend's `detail` text
    #[error("Request failed with status {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The statement builder produced nothing to send
    #[error("Query cannot be built: {0}")]
    InvalidQuery(String),
    #[error("Invalid preset document: {0}")]
    InvalidDocument(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::NotAuthenticated)
            || matches!(self, ClientError::Status { status: 401, .. })
    }
}
