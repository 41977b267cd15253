use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::command::Connection;

/// Target table of ingested rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConnection {
    pub dbms: String,
    pub table: String,
}

impl DbConnection {
    pub fn new(dbms: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            dbms: dbms.into(),
            table: table.into(),
        }
    }
}

/// `/add-data/`: JSON rows streamed into `dbms.table` through a REST
/// message client on the node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddDataRequest {
    pub conn: Connection,
    pub dbconn: DbConnection,
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
}
