pub mod anylog;
pub mod api;
pub mod query_builder;
