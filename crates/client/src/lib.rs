//! Typed client for the AnyLog console backend
//!
//! One function per backend call. Authenticated calls read the session
//! persisted by [`system::auth::storage::SessionStore`].

pub mod domain;
pub mod shared;
pub mod system;

pub use shared::api_client::ApiClient;
pub use shared::error::ClientError;
pub use system::auth::storage::{Session, SessionStore};
