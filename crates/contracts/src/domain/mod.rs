pub mod a001_bookmark;
pub mod a002_preset;
pub mod a003_node_history;
