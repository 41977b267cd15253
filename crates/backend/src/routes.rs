use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::shared::state::AppState;
use crate::system::auth::middleware::require_auth;
use crate::system::middleware::request_logger::request_logger;
use crate::{handlers, system};

/// Routes open without a token
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // AUTH (PUBLIC)
        // ========================================
        .route("/auth/signup/", post(system::handlers::auth::signup))
        .route("/auth/login/", post(system::handlers::auth::login))
        // ========================================
        // SCHEMA INTROSPECTION
        // ========================================
        .route("/sql/get-databases/", post(handlers::sql::get_databases))
        .route("/sql/get-tables/", post(handlers::sql::get_tables))
        .route("/sql/get-columns/", post(handlers::sql::get_columns))
        .route("/sql/build-query/", post(handlers::sql::build_query))
        // ========================================
        // NODE COMMANDS
        // ========================================
        .route("/send-command/", post(handlers::commands::send_command))
        .route(
            "/get-network-nodes/",
            post(handlers::commands::get_network_nodes),
        )
        .route("/monitor/", post(handlers::commands::monitor))
        .route(
            "/submit-policy/",
            post(handlers::commands::submit_policy),
        )
        .route("/add-data/", post(handlers::commands::add_data))
}

/// Routes behind `Authorization: Bearer <token>`
fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/auth/logout/",
            get(system::handlers::auth::logout).post(system::handlers::auth::logout),
        )
        .route(
            "/auth/get-user/",
            get(system::handlers::auth::current_user).post(system::handlers::auth::current_user),
        )
        // A001 Bookmarks
        .route(
            "/auth/bookmark-node/",
            post(handlers::a001_bookmark::bookmark_node),
        )
        .route(
            "/auth/get-bookmarked-nodes/",
            post(handlers::a001_bookmark::list),
        )
        .route(
            "/auth/delete-bookmarked-node/",
            post(handlers::a001_bookmark::delete),
        )
        .route(
            "/auth/update-bookmark-description/",
            post(handlers::a001_bookmark::update_description),
        )
        // A002 Presets
        .route(
            "/auth/add-preset-group/",
            post(handlers::a002_preset::add_group),
        )
        .route(
            "/auth/get-preset-groups/",
            post(handlers::a002_preset::list_groups),
        )
        .route("/auth/add-preset/", post(handlers::a002_preset::add_preset))
        .route(
            "/auth/get-presets/",
            post(handlers::a002_preset::list_presets),
        )
        .route(
            "/auth/delete-preset-group/",
            post(handlers::a002_preset::delete_group),
        )
        .route(
            "/auth/delete-preset/",
            post(handlers::a002_preset::delete_preset),
        )
        .route(
            "/auth/export-presets/",
            post(handlers::a002_preset::export),
        )
        .route(
            "/auth/import-presets/",
            post(handlers::a002_preset::import),
        )
        // A003 Node history
        .route(
            "/auth/get-node-history/",
            post(handlers::a003_node_history::list),
        )
        .route(
            "/auth/clear-node-history/",
            post(handlers::a003_node_history::clear),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

/// Builds the full application router
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    Router::new()
        .merge(public_routes())
        .merge(protected_routes(&state))
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state)
}
