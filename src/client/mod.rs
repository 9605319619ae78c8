//! Chat Client
//!
//! Everything a front end needs to drive one conversation:
//!
//! - **`config`** - server URL and bearer token
//! - **`api`** - HTTP calls to `/api/chat`
//! - **`realtime`** - WebSocket connection to the relay
//! - **`session`** - transcript and compose state for one conversation
//!
//! [`ChatSession`] talks to the network only through the [`MessageApi`] and
//! [`ChannelSubscriber`] traits, so it can be driven by test doubles.

pub mod api;
pub mod config;
pub mod error;
pub mod realtime;
pub mod session;

pub use api::{ChatApiClient, MessageApi};
pub use config::ClientConfig;
pub use error::ClientError;
pub use realtime::{ChannelSubscriber, RealtimeConnection};
pub use session::{ChatSession, ConnectionState};
