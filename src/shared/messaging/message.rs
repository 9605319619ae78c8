//! Chat Message Data Structure
//!
//! A direct message between two marketplace users, optionally about a
//! product listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MessageId, ProductId, UserId};
use crate::shared::channel::channel_key;
use crate::shared::error::SharedError;

/// A stored message, enriched with both participants' display info.
///
/// Field names follow the JSON served to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Store-assigned, monotonically increasing id
    pub id: MessageId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    /// Message body
    pub message: String,
    /// Listing the message is about, if any
    pub product_id: Option<ProductId>,
    /// Whether the receiver has opened the conversation since this was sent
    pub is_read: bool,
    /// Server-assigned creation time
    pub created_at: DateTime<Utc>,
    pub sender_name: String,
    pub sender_picture: Option<String>,
    pub receiver_name: String,
    pub receiver_picture: Option<String>,
    /// Title of the referenced listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_title: Option<String>,
    /// Price of the referenced listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_price: Option<f64>,
}

impl ChatMessage {
    /// Whether this message was exchanged between `a` and `b`, in either direction.
    pub fn is_between(&self, a: UserId, b: UserId) -> bool {
        (self.sender_id == a && self.receiver_id == b)
            || (self.sender_id == b && self.receiver_id == a)
    }

    /// Realtime channel this message is published on
    pub fn channel_key(&self) -> String {
        channel_key(self.sender_id, self.receiver_id)
    }
}

/// Request body for `POST /api/chat/messages`
///
/// Every field is optional at the serde level so that a missing field is
/// reported as a validation error rather than a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub receiver_id: Option<UserId>,
    pub message: Option<String>,
    #[serde(default)]
    pub product_id: Option<ProductId>,
}

/// A validated message ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub body: String,
    pub product_id: Option<ProductId>,
}

impl SendMessageRequest {
    pub fn new(receiver_id: UserId, message: impl Into<String>, product_id: Option<ProductId>) -> Self {
        Self {
            receiver_id: Some(receiver_id),
            message: Some(message.into()),
            product_id,
        }
    }

    /// Check the request on behalf of `sender_id`.
    ///
    /// The body is kept verbatim; a body made only of whitespace counts as
    /// empty.
    pub fn validate(self, sender_id: UserId) -> Result<NewMessage, SharedError> {
        let receiver_id = self
            .receiver_id
            .ok_or_else(|| SharedError::validation("receiverId", "Receiver ID and message are required"))?;

        let body = match self.message {
            Some(body) if !body.trim().is_empty() => body,
            _ => return Err(SharedError::validation("message", "Receiver ID and message are required")),
        };

        if receiver_id <= 0 {
            return Err(SharedError::validation("receiverId", "Invalid receiver ID"));
        }

        if receiver_id == sender_id {
            return Err(SharedError::validation("receiverId", "Cannot send a message to yourself"));
        }

        if matches!(self.product_id, Some(id) if id <= 0) {
            return Err(SharedError::validation("productId", "Invalid product ID"));
        }

        Ok(NewMessage {
            sender_id,
            receiver_id,
            body,
            product_id: self.product_id,
        })
    }
}
