use std::sync::Arc;

use crate::config::Config;
use crate::db::connection::DbPool;
use crate::services::email::EmailSender;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
    pub mailer: Arc<dyn EmailSender>,
}
