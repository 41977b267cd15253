use axum::{extract::State, Json};
use contracts::shared::anylog::{
    ColumnInfo, ColumnsRequest, CommandMethod, DatabaseInfo, DatabasesRequest, QueryBuildRequest,
    TableInfo, TablesRequest,
};
use contracts::shared::api::ApiData;
use contracts::shared::query_builder::{BuildOutcome, QueryStatementBuilder};

use crate::shared::anylog::{commands, parser};
use crate::shared::error::{ApiError, ApiResult};
use crate::shared::json::ApiJson;
use crate::shared::response;
use crate::shared::state::AppState;

fn required<'a>(field: &str, value: &'a str) -> ApiResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        tracing::warn!("Rejected schema request: missing '{}'", field);
        return Err(ApiError::bad_request(format!("Field '{}' is required", field)));
    }
    Ok(value)
}

/// POST /sql/get-databases/
pub async fn get_databases(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DatabasesRequest>,
) -> ApiResult<Json<ApiData<Vec<DatabaseInfo>>>> {
    let conn = required("conn", &request.conn.conn)?;
    let reply = state
        .connector
        .execute(conn, CommandMethod::Get, commands::GET_DATA_NODES)
        .await?;
    Ok(response::data(parser::parse_databases(&reply)))
}

/// POST /sql/get-tables/
pub async fn get_tables(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TablesRequest>,
) -> ApiResult<Json<ApiData<Vec<TableInfo>>>> {
    let conn = required("conn", &request.conn.conn)?;
    let database = required("database", &request.database)?;
    let reply = state
        .connector
        .execute(conn, CommandMethod::Get, &commands::data_nodes_of(database))
        .await?;
    Ok(response::data(parser::parse_tables(&reply)))
}

/// POST /sql/get-columns/
pub async fn get_columns(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ColumnsRequest>,
) -> ApiResult<Json<ApiData<Vec<ColumnInfo>>>> {
    let conn = required("conn", &request.conn.conn)?;
    let database = required("database", &request.database)?;
    let table = required("table", &request.table)?;
    let reply = state
        .connector
        .execute(conn, CommandMethod::Get, &commands::columns_of(database, table))
        .await?;
    Ok(response::data(parser::parse_columns(&reply)))
}

/// POST /sql/build-query/
///
/// Pure: no node is contacted.
pub async fn build_query(
    ApiJson(request): ApiJson<QueryBuildRequest>,
) -> ApiResult<Json<ApiData<BuildOutcome>>> {
    let outcome = QueryStatementBuilder::new(&request.spec, &request.columns).build();
    Ok(response::data(outcome))
}
