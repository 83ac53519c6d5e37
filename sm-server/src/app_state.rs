use sm_auth::{PasswordHasher, TokenService};

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared application state for the auth handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub tokens: Arc<TokenService>,
    pub passwords: PasswordHasher,
}
