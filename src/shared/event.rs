/**
 * Realtime Event Frames
 *
 * JSON frames exchanged over the chat WebSocket. Every frame is an object
 * with an `event` name and a `data` payload:
 *
 * ```json
 * {"event": "join_chat", "data": "3-7"}
 * {"event": "receive_message", "data": { ...message... }}
 * ```
 */
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::messaging::ChatMessage;

/// Frames sent by a client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Subscribe this connection to a conversation channel
    JoinChat(String),
    /// Unsubscribe this connection from a conversation channel
    LeaveChat(String),
}

/// Frames sent by the relay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A message was published on a channel this connection joined
    ReceiveMessage(ChatMessage),
    /// Acknowledges a `join_chat`
    Joined(String),
    /// A client frame was rejected
    Error(String),
}

impl ClientEvent {
    pub fn to_frame(&self) -> Result<String, SharedError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_frame(frame: &str) -> Result<Self, SharedError> {
        Ok(serde_json::from_str(frame)?)
    }
}

impl ServerEvent {
    pub fn to_frame(&self) -> Result<String, SharedError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_frame(frame: &str) -> Result<Self, SharedError> {
        Ok(serde_json::from_str(frame)?)
    }
}
