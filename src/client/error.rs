use thiserror::Error;

use crate::shared::SharedError;

/// Errors surfaced by the chat client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response; `message` is the server's `error` field when present
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("realtime connection failed: {0}")]
    WebSocket(#[from] Box<tokio_tungstenite::tungstenite::Error>),

    #[error("realtime connection closed")]
    Disconnected,

    /// The server refused a realtime request
    #[error("rejected by server: {0}")]
    Rejected(String),

    #[error(transparent)]
    Protocol(#[from] SharedError),
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WebSocket(Box::new(err))
    }
}
