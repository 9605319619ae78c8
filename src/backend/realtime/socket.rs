/**
 * Chat WebSocket Endpoint
 *
 * `GET /ws` upgrades to a realtime connection. The bearer token is taken
 * from the `Authorization` header or the `token` query parameter and is
 * checked before the upgrade.
 *
 * Client frames:
 * - `join_chat` with a channel key; only keys naming the connected user are
 *   accepted, answered with `joined` or `error`
 * - `leave_chat` with a channel key; no reply
 *
 * Server frames: `receive_message`, `joined`, `error`.
 */

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::{header::AUTHORIZATION, HeaderMap},
    response::Response,
};
use futures_util::{Sink, SinkExt, StreamExt};
use serde::Deserialize;

use super::relay::{ChatRelay, RelaySession};
use crate::backend::auth::bearer_token;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::authenticate;
use crate::backend::server::state::AppState;
use crate::shared::channel::channel_includes;
use crate::shared::messaging::UserId;
use crate::shared::{ClientEvent, ServerEvent};

#[derive(Debug, Default, Deserialize)]
pub struct WsParams {
    pub token: Option<String>,
}

/// Token from the `Authorization` header, falling back to `?token=`
fn socket_token(params: &WsParams, headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_string)
        .or_else(|| params.token.clone().filter(|t| !t.is_empty()))
}

pub async fn handle_chat_socket(
    State(app_state): State<AppState>,
    Query(params): Query<WsParams>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Result<Response, BackendError> {
    let token = socket_token(&params, &headers).ok_or_else(|| {
        tracing::warn!("WebSocket connection rejected: no token provided");
        BackendError::unauthorized("Access token required")
    })?;

    let user = authenticate(&app_state, &token).await?;
    let relay = app_state.relay.clone();

    tracing::info!("WebSocket connection accepted for user {}", user.user_id);
    Ok(ws.on_upgrade(move |socket| run_socket(relay, user.user_id, socket)))
}

async fn run_socket(relay: ChatRelay, user_id: UserId, socket: WebSocket) {
    let (session, mut outbox) = relay.connect().await;
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            delivery = outbox.recv() => {
                let Some(message) = delivery else { break };
                if send_event(&mut sender, &ServerEvent::ReceiveMessage(message)).await.is_err() {
                    break;
                }
            }
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    if let Some(reply) = handle_client_frame(&relay, &session, user_id, text.as_str()).await {
                        if send_event(&mut sender, &reply).await.is_err() {
                            break;
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!("WebSocket error for user {}: {}", user_id, e);
                    break;
                }
            }
        }
    }

    relay.disconnect(&session).await;
    tracing::info!("WebSocket connection closed for user {}", user_id);
}

async fn send_event<S>(sender: &mut S, event: &ServerEvent) -> Result<(), axum::Error>
where
    S: Sink<Message, Error = axum::Error> + Unpin,
{
    match event.to_frame() {
        Ok(frame) => sender.send(Message::Text(frame.into())).await,
        Err(e) => {
            tracing::error!("Failed to encode server event: {}", e);
            Ok(())
        }
    }
}

/// Apply one client frame for `user_id`, returning the reply to send, if any.
pub(crate) async fn handle_client_frame(
    relay: &ChatRelay,
    session: &RelaySession,
    user_id: UserId,
    frame: &str,
) -> Option<ServerEvent> {
    let event = match ClientEvent::from_frame(frame) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!("Unrecognised frame from user {}: {}", user_id, e);
            return Some(ServerEvent::Error("Unrecognised event".to_string()));
        }
    };

    match event {
        ClientEvent::JoinChat(key) => {
            if !channel_includes(&key, user_id) {
                tracing::warn!("User {} tried to join channel {}", user_id, key);
                return Some(ServerEvent::Error(format!("Cannot join channel {}", key)));
            }
            relay.join(&key, session).await;
            Some(ServerEvent::Joined(key))
        }
        ClientEvent::LeaveChat(key) => {
            relay.leave(&key, session).await;
            None
        }
    }
}
