use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::shared::anylog::NodeConnector;
use crate::shared::config::Config;

/// Shared by every handler through axum's `State`
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub connector: Arc<dyn NodeConnector>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, connector: Arc<dyn NodeConnector>, config: Config) -> Self {
        Self {
            db,
            connector,
            config: Arc::new(config),
        }
    }
}
