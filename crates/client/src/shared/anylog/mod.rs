pub mod commands;
pub mod sql;
