/**
 * Server Initialization
 *
 * 1. Open the message store and run migrations
 * 2. Create the shared state (store pool, relay, token secret)
 * 3. Build the router
 * 4. Start the periodic relay cleanup task
 */

use std::time::Duration;

use axum::Router;
use sqlx::SqlitePool;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// How often sessions whose socket vanished are swept from the relay
const RELAY_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Connect to the store described by `config` and build the application.
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing marketchat server");

    let db_pool = load_database(config).await?;

    let app = build_app(db_pool, config);
    tracing::info!("Router configured with periodic cleanup task");

    Ok(app)
}

/// Build the application on an existing, migrated pool.
pub fn build_app(db_pool: SqlitePool, config: &ServerConfig) -> Router<()> {
    let app_state = AppState::new(db_pool, &config.jwt_secret);

    let cleanup_relay = app_state.relay.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(RELAY_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = cleanup_relay.prune_closed_sessions().await;
            if removed > 0 {
                tracing::debug!("Pruned {} closed relay subscriptions", removed);
            }
        }
    });

    create_router(app_state, config.cors_origin.as_deref())
}
