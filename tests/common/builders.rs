//! Test data builders

use chrono::{DateTime, TimeZone, Utc};
use marketchat::shared::messaging::{ChatMessage, MessageId, UserId};

/// Fixed instant on 2024-03-01, `minute` minutes after noon
pub fn at_minute(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, minute, 0).unwrap()
}

/// A message as the server would return it
pub fn chat_message(id: MessageId, sender_id: UserId, receiver_id: UserId) -> ChatMessage {
    ChatMessage {
        id,
        sender_id,
        receiver_id,
        message: format!("message {}", id),
        product_id: None,
        is_read: false,
        created_at: at_minute((id % 60) as u32),
        sender_name: format!("user{}", sender_id),
        sender_picture: None,
        receiver_name: format!("user{}", receiver_id),
        receiver_picture: None,
        product_title: None,
        product_price: None,
    }
}
