//! Backend Error Module
//!
//! Error types for the HTTP layer and the message store.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! Handlers return `Result<_, BackendError>` and propagate with `?`; the
//! conversion turns the error into a JSON body with the matching status code.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
