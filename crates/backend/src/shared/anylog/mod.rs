pub mod commands;
pub mod connector;
#[cfg(test)]
pub mod fake;
pub mod ingest;
pub mod parser;
pub mod policy;

pub use connector::{split_destination, HttpNodeConnector, NodeConnector};
