use crate::client::ClientError;

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Where the chat server lives and how to authenticate against it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    server_url: String,
    token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let server_url = std::env::var("CLIENT_API_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        Self::new(server_url)
    }
}

impl ClientConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url: String = server_url.into();
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the JWT token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the JWT token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Token, or [`ClientError::NotAuthenticated`] when none is set
    pub fn require_token(&self) -> Result<&str, ClientError> {
        self.token().ok_or(ClientError::NotAuthenticated)
    }

    /// Clear the token (logout)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    /// WebSocket URL of the realtime endpoint
    pub fn ws_url(&self) -> String {
        let base = if let Some(rest) = self.server_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.server_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            self.server_url.clone()
        };
        format!("{}/ws", base)
    }
}
