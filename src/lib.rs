//! Marketchat - Marketplace Messaging
//!
//! Direct messages between buyers and sellers of a marketplace, with
//! realtime delivery to both participants.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between server and client
//!   - Messages, conversation summaries, user display info
//!   - Channel key derivation and WebSocket frames
//!   - Validation errors
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP API over a SQLite message store
//!   - WebSocket relay that pushes stored messages to joined sessions
//!   - Bearer token verification
//!
//! - **`client`** - Client-side chat session
//!   - HTTP API client and realtime connection
//!   - Per-conversation transcript with de-duplication
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - builds the server modules and the
//!   `marketchat-server` binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use marketchat::client::{ChatApiClient, ChatSession, ClientConfig, RealtimeConnection};
//!
//! # async fn example() -> Result<(), marketchat::client::ClientError> {
//! let config = ClientConfig::new("http://127.0.0.1:5000").with_token("jwt");
//! let api = ChatApiClient::new(config.clone());
//! let mut realtime = RealtimeConnection::connect(&config).await?;
//!
//! let mut session = ChatSession::new(3, 7);
//! session.enter(&api, &mut realtime).await?;
//! session.compose = "Is this still available?".to_string();
//! session.submit(&api, None).await?;
//!
//! while let Some(event) = realtime.next_event().await? {
//!     session.apply_event(event);
//! }
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// Chat client
pub mod client;
