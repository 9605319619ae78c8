//! Chat Session
//!
//! Client-side state for one open conversation: the transcript, the compose
//! box, the last error and where the realtime connection stands.
//!
//! A sent message is not appended when the send call returns. It shows up
//! once the relay pushes it back on the pair's channel, exactly like a
//! message from the other participant. Pushes are de-duplicated by id, so a
//! message is never shown twice.

use std::collections::HashSet;

use crate::client::api::MessageApi;
use crate::client::realtime::ChannelSubscriber;
use crate::client::ClientError;
use crate::shared::channel::channel_key;
use crate::shared::messaging::{ChatMessage, MessageId, ProductId, SendMessageRequest, UserId};
use crate::shared::ServerEvent;

/// Shown when the history request fails
pub const LOAD_FAILED: &str = "Failed to load messages";

/// Shown when a send fails
pub const SEND_FAILED: &str = "Failed to send message";

/// Realtime connection status of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
    /// Joined the conversation's channel
    Joined(String),
}

/// One open conversation, from `me`'s point of view
#[derive(Debug)]
pub struct ChatSession {
    me: UserId,
    other: UserId,
    channel: String,
    transcript: Vec<ChatMessage>,
    seen: HashSet<MessageId>,
    /// Text being composed
    pub compose: String,
    error: Option<String>,
    state: ConnectionState,
}

impl ChatSession {
    pub fn new(me: UserId, other: UserId) -> Self {
        Self {
            me,
            other,
            channel: channel_key(me, other),
            transcript: Vec::new(),
            seen: HashSet::new(),
            compose: String::new(),
            error: None,
            state: ConnectionState::Disconnected,
        }
    }

    pub fn me(&self) -> UserId {
        self.me
    }

    pub fn other(&self) -> UserId {
        self.other
    }

    /// Channel shared with the other participant
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Messages in display order, oldest first
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// The realtime connection is up.
    pub fn on_connected(&mut self) {
        if self.state == ConnectionState::Disconnected {
            self.state = ConnectionState::Connected;
        }
    }

    /// The realtime connection dropped; the channel must be joined again.
    pub fn on_disconnected(&mut self) {
        self.state = ConnectionState::Disconnected;
    }

    /// Open the conversation: join its channel, then load the history.
    ///
    /// Joining first means nothing sent while the history loads is missed.
    pub async fn enter<A, R>(&mut self, api: &A, realtime: &mut R) -> Result<(), ClientError>
    where
        A: MessageApi,
        R: ChannelSubscriber,
    {
        self.on_connected();
        realtime.join(&self.channel).await?;
        self.state = ConnectionState::Joined(self.channel.clone());
        tracing::debug!("Joined {}", self.channel);

        match api.fetch_history(self.other).await {
            Ok(history) => {
                self.load_history(history);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load history with {}: {}", self.other, e);
                self.error = Some(LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Leave the conversation's channel. The connection itself stays open.
    pub async fn exit<R: ChannelSubscriber>(&mut self, realtime: &mut R) -> Result<(), ClientError> {
        if let ConnectionState::Joined(channel) = &self.state {
            realtime.leave(channel).await?;
            self.state = ConnectionState::Connected;
        }
        Ok(())
    }

    /// Replace the transcript with `history`.
    ///
    /// Messages pushed before the history arrived are kept if the history
    /// does not already contain them.
    pub fn load_history(&mut self, history: Vec<ChatMessage>) {
        let pushed_early = std::mem::take(&mut self.transcript);
        self.seen = history.iter().map(|m| m.id).collect();
        self.transcript = history;

        for message in pushed_early {
            if self.seen.insert(message.id) {
                self.transcript.push(message);
            }
        }
        self.transcript.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    }

    /// Apply a message pushed by the relay.
    ///
    /// Returns `false` if it was already shown or belongs to another pair.
    pub fn apply_push(&mut self, message: ChatMessage) -> bool {
        if !message.is_between(self.me, self.other) {
            return false;
        }
        if !self.seen.insert(message.id) {
            return false;
        }
        self.transcript.push(message);
        true
    }

    /// Apply any server event; only `receive_message` changes the transcript.
    pub fn apply_event(&mut self, event: ServerEvent) -> bool {
        match event {
            ServerEvent::ReceiveMessage(message) => self.apply_push(message),
            ServerEvent::Joined(channel) => {
                if channel == self.channel {
                    self.state = ConnectionState::Joined(channel);
                }
                false
            }
            ServerEvent::Error(reason) => {
                tracing::warn!("Relay error: {}", reason);
                false
            }
        }
    }

    /// Send the compose text.
    ///
    /// Blank input is a no-op and returns `Ok(None)`. On success the compose
    /// box is cleared; on failure it is kept and the error is recorded.
    pub async fn submit<A: MessageApi>(
        &mut self,
        api: &A,
        product_id: Option<ProductId>,
    ) -> Result<Option<ChatMessage>, ClientError> {
        if self.compose.trim().is_empty() {
            return Ok(None);
        }

        let request = SendMessageRequest::new(self.other, self.compose.clone(), product_id);
        match api.send_message(request).await {
            Ok(message) => {
                self.compose.clear();
                self.error = None;
                Ok(Some(message))
            }
            Err(e) => {
                tracing::warn!("Failed to send message to {}: {}", self.other, e);
                self.error = Some(SEND_FAILED.to_string());
                Err(e)
            }
        }
    }
}
