//! Realtime Connection
//!
//! Client side of the `/ws` endpoint, over tokio-tungstenite.

use std::collections::VecDeque;
use std::future::Future;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{header::AUTHORIZATION, HeaderValue};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::client::{ClientConfig, ClientError};
use crate::shared::{ClientEvent, ServerEvent};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Joins conversation channels on behalf of a [`ChatSession`](crate::client::ChatSession)
pub trait ChannelSubscriber {
    /// Subscribe to `channel`, resolving once the server acknowledged it
    fn join(&mut self, channel: &str) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn leave(&mut self, channel: &str) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// An authenticated WebSocket connection to the relay
pub struct RealtimeConnection {
    stream: WsStream,
    /// Events read while waiting for an acknowledgement
    pending: VecDeque<ServerEvent>,
}

impl RealtimeConnection {
    /// Open the realtime connection with the configured token.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        let token = config.require_token()?;

        let mut request = config.ws_url().into_client_request()?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| ClientError::NotAuthenticated)?;
        request.headers_mut().insert(AUTHORIZATION, bearer);

        let (stream, _) = connect_async(request).await?;
        tracing::debug!("Realtime connection established to {}", config.ws_url());

        Ok(Self {
            stream,
            pending: VecDeque::new(),
        })
    }

    pub async fn send_event(&mut self, event: &ClientEvent) -> Result<(), ClientError> {
        let frame = event.to_frame()?;
        self.stream.send(Message::text(frame)).await?;
        Ok(())
    }

    /// Next event from the server, or `None` once the connection closed.
    ///
    /// Frames that are not valid events are skipped.
    pub async fn next_event(&mut self) -> Result<Option<ServerEvent>, ClientError> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(Some(event));
        }
        self.read_event().await
    }

    async fn read_event(&mut self) -> Result<Option<ServerEvent>, ClientError> {
        while let Some(frame) = self.stream.next().await {
            match frame? {
                Message::Text(text) => match ServerEvent::from_frame(text.as_str()) {
                    Ok(event) => return Ok(Some(event)),
                    Err(e) => tracing::warn!("Ignoring malformed server frame: {}", e),
                },
                Message::Close(_) => return Ok(None),
                _ => {}
            }
        }
        Ok(None)
    }

    pub async fn close(mut self) -> Result<(), ClientError> {
        self.stream.close(None).await?;
        Ok(())
    }
}

impl ChannelSubscriber for RealtimeConnection {
    async fn join(&mut self, channel: &str) -> Result<(), ClientError> {
        self.send_event(&ClientEvent::JoinChat(channel.to_string())).await?;

        loop {
            match self.read_event().await? {
                Some(ServerEvent::Joined(key)) if key == channel => return Ok(()),
                Some(ServerEvent::Error(reason)) => return Err(ClientError::Rejected(reason)),
                Some(other) => self.pending.push_back(other),
                None => return Err(ClientError::Disconnected),
            }
        }
    }

    async fn leave(&mut self, channel: &str) -> Result<(), ClientError> {
        self.send_event(&ClientEvent::LeaveChat(channel.to_string())).await
    }
}
