use serde::{Deserialize, Serialize};

/// Envelope of every successful backend reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiData<T> {
    pub data: T,
}

impl<T> ApiData<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Plain acknowledgement, e.g. `{"message": "Bookmark added"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of every error reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
