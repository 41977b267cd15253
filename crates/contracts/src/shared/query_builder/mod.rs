pub mod builder;
pub mod column_types;
pub mod query_spec;

pub use builder::{build_query, QueryStatementBuilder};
pub use column_types::{is_aggregatable_type, is_date_time_type, is_numeric_type, ColumnKind};
pub use query_spec::*;
