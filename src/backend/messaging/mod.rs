//! Messaging Module
//!
//! Direct messages between marketplace users.
//!
//! - **`db`** - message store and conversation aggregation
//! - **`handlers`** - the `/api/chat` HTTP endpoints

pub mod db;
pub mod handlers;

pub use handlers::{get_conversations, get_messages, get_user, send_message};
