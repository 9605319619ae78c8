//! Shared Module
//!
//! Types used on both sides of the wire: the server serializes them into
//! HTTP responses and WebSocket frames, the client deserializes them.
//!
//! # Overview
//!
//! - `messaging` - messages, conversation summaries, user display info
//! - `channel` - realtime channel key derivation
//! - `event` - WebSocket frame types
//! - `error` - validation and serialization errors

/// Messaging data structures
pub mod messaging;

/// Realtime channel keys
pub mod channel;

/// Realtime event frames
pub mod event;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use channel::{channel_key, parse_channel_key};
pub use error::SharedError;
pub use event::{ClientEvent, ServerEvent};
pub use messaging::{ChatMessage, ConversationSummary, UserId, UserSummary};
