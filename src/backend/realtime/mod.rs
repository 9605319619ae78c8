//! Real-time Delivery Module
//!
//! Pushes newly stored messages to connected clients over WebSockets.
//!
//! # Architecture
//!
//! - **`relay`** - in-memory registry of channel subscriptions and fan-out
//! - **`socket`** - the `/ws` endpoint: authentication, join/leave frames,
//!   and forwarding relay deliveries to the socket
//!
//! ```text
//! POST /api/chat/messages ──store──▶ ChatRelay::publish("3-7")
//!                                         │
//!                     ┌───────────────────┴───────────────────┐
//!                     ▼                                       ▼
//!              session outbox (user 3)                session outbox (user 7)
//!                     │                                       │
//!              receive_message frame                  receive_message frame
//! ```
//!
//! Delivery is best-effort: a client that is not joined at publish time does
//! not get the message pushed and picks it up from history instead.

/// Channel registry and fan-out
pub mod relay;

/// WebSocket endpoint
pub mod socket;

pub use relay::{ChatRelay, RelaySession, SessionId, OUTBOX_CAPACITY};
pub use socket::handle_chat_socket;
