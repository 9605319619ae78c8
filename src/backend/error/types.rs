/**
 * Backend Error Types
 *
 * Errors raised by HTTP handlers and the message store. Each variant maps to
 * one HTTP status:
 *
 * - `Validation` / `SharedError` - 400, the client can fix the request
 * - `Unauthorized` - 401, missing or invalid bearer token
 * - `NotFound` - 404, unknown user or listing
 * - `Store` - 500, persistence failure; the detail is logged, never returned
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Message returned to clients for any persistence failure
pub const GENERIC_STORE_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
///
/// ```rust
/// use marketchat::backend::error::BackendError;
///
/// let err = BackendError::not_found("User not found");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Malformed or incomplete request
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Missing or rejected credentials
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// The referenced user or listing does not exist
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Validation error raised by shared request types
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Database failure
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl BackendError {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            },
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client.
    ///
    /// Internal failures collapse to a generic message.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::Unauthorized { message } => message.clone(),
            Self::NotFound { message } => message.clone(),
            Self::SharedError(SharedError::ValidationError { message, .. }) => message.clone(),
            Self::SharedError(SharedError::SerializationError { .. }) | Self::Store(_) => {
                GENERIC_STORE_MESSAGE.to_string()
            }
        }
    }
}
