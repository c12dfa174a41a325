use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{model::session::SessionCache, util::token::SessionTokenCodec};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub session_cache: Arc<dyn SessionCache>,
    pub token_codec: SessionTokenCodec,
}
