//! API utilities for client-backend communication

use super::error::ClientError;

/// Backend used when nothing else is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Environment variable overriding the backend address
pub const API_BASE_ENV: &str = "ANYLOG_CONSOLE_API_URL";

/// Get the base URL for API requests
///
/// `ANYLOG_CONSOLE_API_URL` wins when set and non-blank; a trailing `/` is
/// dropped so paths can be appended as they are.
pub fn api_base() -> String {
    let configured = std::env::var(API_BASE_ENV).ok();
    normalize_base(configured.as_deref().unwrap_or(DEFAULT_API_BASE))
}

pub fn normalize_base(base: &str) -> String {
    let base = base.trim();
    let base = if base.is_empty() { DEFAULT_API_BASE } else { base };
    base.trim_end_matches('/').to_string()
}

/// Build a full API URL from a base and a path such as `/auth/login/`
pub fn api_url(base: &str, path: &str) -> String {
    format!("{}{}", base, path)
}

/// Blank-field check shared by every wrapper
pub fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ClientError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ClientError::MissingField(field));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://10.0.0.5:8000/"), "http://10.0.0.5:8000");
        assert_eq!(normalize_base("  "), DEFAULT_API_BASE);
        assert_eq!(
            api_url(&normalize_base("http://h:1"), "/auth/login/"),
            "http://h:1/auth/login/"
        );
    }

    #[test]
    fn test_require() {
        assert_eq!(require("node", " a ").unwrap(), "a");
        assert!(matches!(
            require("node", " "),
            Err(ClientError::MissingField("node"))
        ));
    }
}
