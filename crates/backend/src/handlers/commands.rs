use axum::{extract::State, Json};
use contracts::shared::anylog::{
    AddDataRequest, CommandMethod, Connection, NodeResponse, SendCommandRequest, SubmitPolicyRequest,
};
use contracts::shared::api::ApiData;
use serde_json::{Map, Value};

use crate::domain::a003_node_history::service as history;
use crate::shared::anylog::{commands, ingest, parser, policy};
use crate::shared::error::{ApiError, ApiResult};
use crate::shared::json::ApiJson;
use crate::shared::response;
use crate::shared::state::AppState;
use crate::system::auth::extractor::OptionalUser;

fn required_conn(conn: &Connection) -> ApiResult<&str> {
    let conn = conn.conn.trim();
    if conn.is_empty() {
        return Err(ApiError::bad_request("Field 'conn' is required"));
    }
    Ok(conn)
}

/// POST /send-command/
pub async fn send_command(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    ApiJson(request): ApiJson<SendCommandRequest>,
) -> ApiResult<Json<ApiData<NodeResponse>>> {
    let conn = required_conn(&request.conn)?;

    let Some(method) = CommandMethod::parse(&request.command.method) else {
        tracing::warn!("Rejected command with type '{}'", request.command.method);
        return Err(ApiError::bad_request(format!(
            "Unsupported command type '{}'",
            request.command.method
        )));
    };

    let cmd = request.command.cmd.trim();
    if cmd.is_empty() {
        return Err(ApiError::bad_request("Field 'cmd' is required"));
    }

    let reply = state.connector.execute(conn, method, cmd).await?;

    if let Some(claims) = user {
        history::record(&state.db, &claims.sub, conn).await?;
    }

    Ok(response::data(reply))
}

/// POST /get-network-nodes/
pub async fn get_network_nodes(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<Connection>,
) -> ApiResult<Json<ApiData<Vec<String>>>> {
    let conn = required_conn(&request)?;
    let reply = state
        .connector
        .execute(conn, CommandMethod::Get, commands::TEST_NETWORK)
        .await?;
    Ok(response::data(parser::parse_network_nodes(&reply)))
}

/// POST /monitor/
pub async fn monitor(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<Connection>,
) -> ApiResult<Json<ApiData<Vec<Map<String, Value>>>>> {
    let conn = required_conn(&request)?;
    let reply = state
        .connector
        .execute(conn, CommandMethod::Get, commands::GET_MONITORED_OPERATORS)
        .await?;
    Ok(response::data(parser::parse_monitored(&reply)))
}

/// POST /submit-policy/
pub async fn submit_policy(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubmitPolicyRequest>,
) -> ApiResult<Json<ApiData<NodeResponse>>> {
    let conn = required_conn(&request.conn)?;
    let reply = policy::submit_policy(state.connector.as_ref(), conn, &request.policy).await?;
    Ok(response::data(reply))
}

/// POST /add-data/
pub async fn add_data(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AddDataRequest>,
) -> ApiResult<Json<ApiData<NodeResponse>>> {
    let conn = required_conn(&request.conn)?;
    let reply = ingest::add_data(
        state.connector.as_ref(),
        conn,
        &request.dbconn,
        &request.data,
    )
    .await?;
    Ok(response::data(reply))
}
