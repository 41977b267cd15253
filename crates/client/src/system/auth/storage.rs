use contracts::system::auth::{LoginResponse, UserInfo};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::shared::error::ClientError;

/// File name used when no explicit path is given
pub const DEFAULT_SESSION_FILE: &str = ".anylog-console-session.json";

/// Persisted session: the access token identifies it on the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: UserInfo,
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            access_token: response.access_token,
            user: response.user,
        }
    }
}

/// JSON file holding the current session
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `.anylog-console-session.json` in the working directory
    pub fn in_current_dir() -> Self {
        Self::new(DEFAULT_SESSION_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored session, `None` when the file is absent
    pub fn load(&self) -> Result<Option<Session>, ClientError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&contents)?))
    }

    pub fn save(&self, session: &Session) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        tracing::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    /// Removes the session file; a missing file is not an error
    pub fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Access token of the stored session
    pub fn access_token(&self) -> Result<String, ClientError> {
        match self.load()? {
            Some(session) if !session.access_token.is_empty() => Ok(session.access_token),
            _ => Err(ClientError::NotAuthenticated),
        }
    }
}
