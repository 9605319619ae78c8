/**
 * Chat API Routes
 *
 * Mounted under `/api/chat`. Every route requires a bearer token.
 *
 * - `GET  /conversations` - inbox for the current user
 * - `GET  /messages/{otherUserId}` - history with one user, marks it read
 * - `POST /messages` - send a message
 * - `GET  /user/{userId}` - public profile of a chat participant
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::messaging::{get_conversations, get_messages, get_user, send_message};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Build the authenticated chat API router
pub fn chat_api_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/conversations", get(get_conversations))
        .route("/messages/{other_user_id}", get(get_messages))
        .route("/messages", post(send_message))
        .route("/user/{user_id}", get(get_user))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware))
}
