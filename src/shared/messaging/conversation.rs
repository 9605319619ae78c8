//! Conversation Summary
//!
//! A conversation is never stored: it is the set of messages between the
//! requesting user and one counterparty, summarised for the inbox view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// One inbox entry, from the point of view of the requesting user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationSummary {
    /// The other participant
    pub other_user_id: UserId,
    pub other_user_name: String,
    /// Stored profile picture of the other participant, if any
    pub other_user_picture: Option<String>,
    /// Picture to display: the stored one or a generated initials avatar
    pub other_user_avatar: String,
    /// Creation time of the latest message, in either direction
    pub last_message_time: DateTime<Utc>,
    /// Body of the latest message, in either direction
    pub last_message: String,
    /// Messages from the other participant not yet read by the requester
    pub unread_count: i64,
}
