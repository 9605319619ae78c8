/**
 * Chat Relay
 *
 * In-memory registry of which live connections have joined which
 * conversation channels. A channel is named by its canonical key
 * (`"3-7"`); joining is only a subscription, nothing is stored.
 *
 * Each connection owns a bounded outbox. Publishing to a channel pushes
 * the message into the outbox of every session subscribed at that moment.
 * Publishes are serialized by the registry lock, so every subscriber sees a
 * channel's messages in publish order.
 *
 * A session whose outbox is full is evicted: the relay drops every sender it
 * holds for it, its receiver drains and then closes, and the socket ends.
 * The client reconnects and reloads history.
 *
 * State is per process. Running several server instances needs an external
 * fan-out, which this relay does not provide.
 */

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::shared::messaging::ChatMessage;

/// Identifies one live connection
pub type SessionId = Uuid;

/// Messages a session may have queued before it is evicted
pub const OUTBOX_CAPACITY: usize = 256;

type Outbox = mpsc::Sender<ChatMessage>;
type Subscribers = HashMap<SessionId, Outbox>;

/// Handle for one live connection, returned by [`ChatRelay::connect`]
#[derive(Clone, Debug)]
pub struct RelaySession {
    id: SessionId,
}

impl RelaySession {
    pub fn id(&self) -> SessionId {
        self.id
    }
}

#[derive(Default)]
struct Registry {
    sessions: HashMap<SessionId, Outbox>,
    channels: HashMap<String, Subscribers>,
}

impl Registry {
    /// Forget `id` everywhere, dropping every sender for it.
    fn evict(&mut self, id: &SessionId) {
        self.sessions.remove(id);
        self.channels.retain(|_, subscribers| {
            subscribers.remove(id);
            !subscribers.is_empty()
        });
    }
}

/// Channel registry shared by all connections
#[derive(Clone)]
pub struct ChatRelay {
    registry: Arc<RwLock<Registry>>,
    capacity: usize,
}

impl Default for ChatRelay {
    fn default() -> Self {
        Self::with_outbox_capacity(OUTBOX_CAPACITY)
    }
}

impl ChatRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outbox_capacity(capacity: usize) -> Self {
        Self {
            registry: Arc::default(),
            capacity: capacity.max(1),
        }
    }

    /// Register a new connection. It belongs to no channel until it joins one.
    pub async fn connect(&self) -> (RelaySession, mpsc::Receiver<ChatMessage>) {
        let (outbox, inbox) = mpsc::channel(self.capacity);
        let session = RelaySession { id: Uuid::new_v4() };
        self.registry.write().await.sessions.insert(session.id, outbox);
        tracing::debug!("Relay session {} connected", session.id);
        (session, inbox)
    }

    /// Subscribe `session` to `channel`. Joining twice is a no-op.
    ///
    /// Returns `true` if the session was not already subscribed. An evicted
    /// or disconnected session is never added.
    pub async fn join(&self, channel: &str, session: &RelaySession) -> bool {
        let mut registry = self.registry.write().await;
        let Some(outbox) = registry.sessions.get(&session.id).cloned() else {
            tracing::debug!("Session {} is gone, not joining {}", session.id, channel);
            return false;
        };
        let subscribers = registry.channels.entry(channel.to_string()).or_default();
        let added = subscribers.insert(session.id, outbox).is_none();
        if added {
            tracing::debug!(
                "Session {} joined {} ({} subscribers)",
                session.id,
                channel,
                subscribers.len()
            );
        }
        added
    }

    /// Unsubscribe `session` from `channel`.
    ///
    /// Returns `true` if the session was subscribed.
    pub async fn leave(&self, channel: &str, session: &RelaySession) -> bool {
        let mut registry = self.registry.write().await;
        let Some(subscribers) = registry.channels.get_mut(channel) else {
            return false;
        };
        let removed = subscribers.remove(&session.id).is_some();
        if subscribers.is_empty() {
            registry.channels.remove(channel);
        }
        if removed {
            tracing::debug!("Session {} left {}", session.id, channel);
        }
        removed
    }

    /// Remove `session` from every channel it joined.
    pub async fn disconnect(&self, session: &RelaySession) {
        self.registry.write().await.evict(&session.id);
        tracing::debug!("Relay session {} disconnected", session.id);
    }

    /// Deliver `message` to every session currently subscribed to `channel`.
    ///
    /// Returns the number of sessions it was handed to. Sessions whose
    /// receiver has been dropped are pruned; sessions with a full outbox are
    /// evicted.
    pub async fn publish(&self, channel: &str, message: ChatMessage) -> usize {
        let mut registry = self.registry.write().await;
        let Some(subscribers) = registry.channels.get_mut(channel) else {
            tracing::debug!("No subscribers on {} for message {}", channel, message.id);
            return 0;
        };

        let mut lagging = Vec::new();
        subscribers.retain(|id, outbox| match outbox.try_send(message.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                lagging.push(*id);
                false
            }
            Err(TrySendError::Closed(_)) => false,
        });
        let delivered = subscribers.len();
        if subscribers.is_empty() {
            registry.channels.remove(channel);
        }

        for id in &lagging {
            tracing::warn!("Evicting session {}: outbox full", id);
            registry.evict(id);
        }

        tracing::debug!("Published message {} on {} to {} sessions", message.id, channel, delivered);
        delivered
    }

    /// Number of sessions subscribed to `channel`
    pub async fn subscriber_count(&self, channel: &str) -> usize {
        self.registry
            .read()
            .await
            .channels
            .get(channel)
            .map_or(0, HashMap::len)
    }

    /// Number of channels with at least one subscriber
    pub async fn channel_count(&self) -> usize {
        self.registry.read().await.channels.len()
    }

    /// Drop sessions whose connection went away without disconnecting.
    ///
    /// Returns how many subscriptions were removed.
    pub async fn prune_closed_sessions(&self) -> usize {
        let mut registry = self.registry.write().await;
        registry.sessions.retain(|_, outbox| !outbox.is_closed());
        let mut removed = 0;
        registry.channels.retain(|_, subscribers| {
            let before = subscribers.len();
            subscribers.retain(|_, outbox| !outbox.is_closed());
            removed += before - subscribers.len();
            !subscribers.is_empty()
        });
        removed
    }
}
