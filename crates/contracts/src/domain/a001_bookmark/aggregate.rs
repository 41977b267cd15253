use serde::{Deserialize, Serialize};

/// Node address saved by a user, with a free-text note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub node: String,
    #[serde(default)]
    pub description: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookmarkNodeRequest {
    #[serde(default, alias = "conn")]
    pub node: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBookmarkDescriptionRequest {
    #[serde(default, alias = "conn")]
    pub node: String,
    #[serde(default)]
    pub description: String,
}
