pub mod anylog;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod json;
pub mod response;
pub mod state;
