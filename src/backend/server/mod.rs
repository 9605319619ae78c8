//! Server Module
//!
//! Configuration, shared state and startup for the messaging server.
//!
//! - **`config`** - layered configuration and database bootstrap
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`init`** - builds the router from a configuration
//!
//! ```rust,no_run
//! use marketchat::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{build_app, create_app};
pub use state::AppState;
