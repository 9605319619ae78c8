//! Messaging Module
//!
//! Data structures exchanged by the messaging API:
//!
//! - `ChatMessage` - A stored direct message
//! - `ConversationSummary` - One inbox entry per counterparty
//! - `UserSummary` - Display info of a participant
//!
//! # Usage
//!
//! ```rust
//! use marketchat::shared::messaging::{ChatMessage, ConversationSummary, UserSummary};
//! ```

pub mod conversation;
pub mod message;
pub mod user;

/// Identifier of a marketplace user
pub type UserId = i64;
/// Identifier of a stored message
pub type MessageId = i64;
/// Identifier of a product listing
pub type ProductId = i64;

// Re-export all types
pub use conversation::ConversationSummary;
pub use message::{ChatMessage, NewMessage, SendMessageRequest};
pub use user::{avatar_url, UserSummary};
