use contracts::shared::anylog::{
    ColumnInfo, ColumnsRequest, Connection, DatabaseInfo, DatabasesRequest, QueryBuildRequest,
    TableInfo, TablesRequest,
};
use contracts::shared::query_builder::{BuildOutcome, QuerySpec};

use crate::shared::api_client::ApiClient;
use crate::shared::api_utils::require;
use crate::shared::error::ClientError;

fn connection(conn: &str) -> Result<Connection, ClientError> {
    Ok(Connection::new(require("conn", conn)?))
}

pub async fn get_databases(client: &ApiClient, conn: &str) -> Result<Vec<DatabaseInfo>, ClientError> {
    let request = DatabasesRequest {
        conn: connection(conn)?,
    };
    client.post("/sql/get-databases/", &request).await
}

fn tables_request(conn: &str, database: &str) -> Result<TablesRequest, ClientError> {
    Ok(TablesRequest {
        conn: connection(conn)?,
        database: require("database", database)?.to_string(),
    })
}

pub async fn get_tables(
    client: &ApiClient,
    conn: &str,
    database: &str,
) -> Result<Vec<TableInfo>, ClientError> {
    let request = tables_request(conn, database)?;
    client.post("/sql/get-tables/", &request).await
}

fn columns_request(conn: &str, database: &str, table: &str) -> Result<ColumnsRequest, ClientError> {
    Ok(ColumnsRequest {
        conn: connection(conn)?,
        database: require("database", database)?.to_string(),
        table: require("table", table)?.to_string(),
    })
}

pub async fn get_columns(
    client: &ApiClient,
    conn: &str,
    database: &str,
    table: &str,
) -> Result<Vec<ColumnInfo>, ClientError> {
    let request = columns_request(conn, database, table)?;
    client.post("/sql/get-columns/", &request).await
}

/// Server-side build; the same builder also runs locally in `run_query`
pub async fn build_query(
    client: &ApiClient,
    spec: &QuerySpec,
    columns: &[ColumnInfo],
) -> Result<BuildOutcome, ClientError> {
    let request = QueryBuildRequest {
        spec: spec.clone(),
        columns: columns.to_vec(),
    };
    client.post("/sql/build-query/", &request).await
}
