//! Middleware Module
//!
//! Request processing shared by the chat routes.
//!
//! - **`auth`** - bearer token verification and the `AuthUser` extractor

pub mod auth;

pub use auth::{auth_middleware, authenticate, AuthUser, AuthenticatedUser};
