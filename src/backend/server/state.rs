/**
 * Application State Management
 *
 * `AppState` is cloned into every handler. The `FromRef` implementations let
 * handlers extract only the part they need:
 *
 * ```rust,ignore
 * async fn handler(State(pool): State<SqlitePool>, State(relay): State<ChatRelay>) {
 *     // ...
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::realtime::ChatRelay;

/// Shared state for the messaging server
#[derive(Clone)]
pub struct AppState {
    /// Message store connection pool
    pub db_pool: SqlitePool,

    /// Live WebSocket subscriptions
    pub relay: ChatRelay,

    /// Secret used to verify bearer tokens
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, jwt_secret: &str) -> Self {
        Self {
            db_pool,
            relay: ChatRelay::new(),
            jwt_secret: Arc::from(jwt_secret),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for ChatRelay {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.relay.clone()
    }
}
