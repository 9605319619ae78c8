//! Route Configuration Module
//!
//! - **`router`** - main router assembly, CORS and tracing layers
//! - **`api_routes`** - the authenticated `/api/chat` endpoints

pub mod api_routes;
pub mod router;

pub use api_routes::chat_api_routes;
pub use router::create_router;
