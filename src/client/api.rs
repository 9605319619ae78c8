//! Chat API Client
//!
//! Async wrapper over the `/api/chat` endpoints.

use std::future::Future;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::{ClientConfig, ClientError};
use crate::shared::messaging::{ChatMessage, ConversationSummary, SendMessageRequest, UserId, UserSummary};

/// The two calls a [`ChatSession`](crate::client::ChatSession) makes over HTTP
pub trait MessageApi {
    /// History with `other_user_id`, oldest first
    fn fetch_history(&self, other_user_id: UserId) -> impl Future<Output = Result<Vec<ChatMessage>, ClientError>> + Send;

    /// Send a message, returning it as stored
    fn send_message(&self, request: SendMessageRequest) -> impl Future<Output = Result<ChatMessage, ClientError>> + Send;
}

/// Error body returned by the server
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Chat API client
#[derive(Debug, Clone)]
pub struct ChatApiClient {
    config: ClientConfig,
    client: Client,
}

impl ChatApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.config.require_token()?;
        Ok(request.bearer_auth(token))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or_else(|_| status.to_string());
            tracing::debug!("Request failed with {}: {}", status, message);
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.authorized(self.client.get(self.config.api_url(path)))?;
        Self::read_json(request.send().await?).await
    }

    /// Inbox for the current user, most recent first
    pub async fn conversations(&self) -> Result<Vec<ConversationSummary>, ClientError> {
        self.get_json("/api/chat/conversations").await
    }

    /// History with `other_user_id`; marks their messages to us as read
    pub async fn messages(&self, other_user_id: UserId) -> Result<Vec<ChatMessage>, ClientError> {
        self.get_json(&format!("/api/chat/messages/{}", other_user_id)).await
    }

    pub async fn send(&self, request: &SendMessageRequest) -> Result<ChatMessage, ClientError> {
        let builder = self
            .authorized(self.client.post(self.config.api_url("/api/chat/messages")))?
            .json(request);
        Self::read_json(builder.send().await?).await
    }

    /// Public profile of a chat participant
    pub async fn user(&self, user_id: UserId) -> Result<UserSummary, ClientError> {
        self.get_json(&format!("/api/chat/user/{}", user_id)).await
    }
}

impl MessageApi for ChatApiClient {
    fn fetch_history(&self, other_user_id: UserId) -> impl Future<Output = Result<Vec<ChatMessage>, ClientError>> + Send {
        self.messages(other_user_id)
    }

    fn send_message(&self, request: SendMessageRequest) -> impl Future<Output = Result<ChatMessage, ClientError>> + Send {
        async move { self.send(&request).await }
    }
}
