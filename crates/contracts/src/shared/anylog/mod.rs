pub mod command;
pub mod ingest;
pub mod policy;
pub mod schema;

pub use command::*;
pub use ingest::*;
pub use policy::*;
pub use schema::*;
