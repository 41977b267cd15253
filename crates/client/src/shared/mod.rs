pub mod anylog;
pub mod api_client;
pub mod api_utils;
pub mod error;
