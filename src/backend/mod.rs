//! Backend Module
//!
//! Server side of the marketplace chat: an Axum HTTP API over a SQLite
//! message store, plus a WebSocket relay that pushes new messages to the
//! two participants of a conversation.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - configuration, application state and startup
//! - **`routes`** - router assembly and middleware layers
//! - **`messaging`** - message store and `/api/chat` handlers
//! - **`realtime`** - channel relay and `/ws` endpoint
//! - **`auth`** - bearer token verification and user lookups
//! - **`middleware`** - request authentication
//! - **`error`** - backend error type and its HTTP mapping
//!
//! ```text
//! backend/
//! ├── main.rs         - binary entry point
//! ├── server/         - config, state, init
//! ├── routes/         - router, api_routes
//! ├── messaging/      - db, handlers
//! ├── realtime/       - relay, socket
//! ├── auth/           - sessions, users
//! ├── middleware/     - auth
//! └── error/          - types, conversion
//! ```
//!
//! # Sending a message
//!
//! 1. `POST /api/chat/messages` is authenticated by `auth_middleware`
//! 2. The request is validated and the receiver (and listing) checked
//! 3. The message is stored and re-read with participant details
//! 4. It is published on the pair's channel, e.g. `"3-7"`
//! 5. Every joined WebSocket session receives a `receive_message` frame
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`; the error converts into a
//! `{"error": ..., "status": ...}` JSON body. Store failures are logged and
//! reported to clients as a generic 500.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Message store and HTTP handlers
pub mod messaging;

/// Realtime delivery
pub mod realtime;

/// Backend error types
pub mod error;

/// Token verification and user lookups
pub mod auth;

/// Middleware for request processing
pub mod middleware;

pub use error::BackendError;
pub use realtime::ChatRelay;
pub use server::{build_app, create_app, AppState, ServerConfig};
