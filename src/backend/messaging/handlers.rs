//! Messaging HTTP Handlers
//!
//! All handlers run behind [`auth_middleware`](crate::backend::middleware::auth_middleware)
//! and act on behalf of the authenticated user.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;

use super::db;
use crate::backend::auth::{get_user_by_id, user_exists};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::realtime::ChatRelay;
use crate::shared::messaging::{ChatMessage, ConversationSummary, SendMessageRequest, UserId, UserSummary};

/// Parse a user id path segment. Only positive integers are accepted.
fn parse_user_id(raw: &str) -> Result<UserId, BackendError> {
    raw.parse::<UserId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| BackendError::validation("Invalid user ID"))
}

/// `GET /api/chat/conversations`
pub async fn get_conversations(
    State(db_pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<ConversationSummary>>, BackendError> {
    let conversations = db::list_conversations(&db_pool, user.user_id).await?;
    tracing::debug!("User {} has {} conversations", user.user_id, conversations.len());
    Ok(Json(conversations))
}

/// `GET /api/chat/messages/{otherUserId}`
///
/// Opening a conversation marks the other user's messages as read.
pub async fn get_messages(
    State(db_pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(other_user_id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, BackendError> {
    let other_user_id = parse_user_id(&other_user_id)?;

    if !user_exists(&db_pool, other_user_id).await? {
        return Err(BackendError::not_found("User not found"));
    }

    let messages = db::fetch_history_and_mark_read(&db_pool, user.user_id, other_user_id).await?;
    Ok(Json(messages))
}

/// `POST /api/chat/messages`
///
/// Stores the message, then publishes it on the pair's channel. The stored
/// message is returned with `201 Created` whether or not anyone was listening.
pub async fn send_message(
    State(db_pool): State<SqlitePool>,
    State(relay): State<ChatRelay>,
    AuthUser(user): AuthUser,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ChatMessage>), BackendError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("Rejected message body: {}", rejection);
        BackendError::validation(rejection.body_text())
    })?;

    let new_message = request.validate(user.user_id)?;

    if !user_exists(&db_pool, new_message.receiver_id).await? {
        return Err(BackendError::not_found("Receiver not found"));
    }

    if let Some(product_id) = new_message.product_id {
        if !db::product_exists(&db_pool, product_id).await? {
            return Err(BackendError::validation("Invalid product ID"));
        }
    }

    let message = db::insert_message(&db_pool, &new_message).await?;

    let channel = message.channel_key();
    let delivered = relay.publish(&channel, message.clone()).await;
    tracing::info!(
        "Message {} from {} to {} delivered to {} live sessions",
        message.id,
        message.sender_id,
        message.receiver_id,
        delivered
    );

    Ok((StatusCode::CREATED, Json(message)))
}

/// `GET /api/chat/user/{userId}`
pub async fn get_user(
    State(db_pool): State<SqlitePool>,
    AuthUser(_): AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<UserSummary>, BackendError> {
    let user_id = parse_user_id(&user_id)?;

    let user = get_user_by_id(&db_pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(user.into()))
}
