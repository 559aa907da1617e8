//! Fan-out of engine events to connected subscribers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace};

/// Event type for per-game live updates.
pub const GAME_UPDATE: &str = "game_update";

/// Identity of one connected subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// A live subscription: drain `receiver` and forward each message to the
/// transport. Dropping the receiver ends the subscription at the next
/// publish.
pub struct Subscription {
    pub id: SubscriberId,
    pub receiver: UnboundedReceiver<String>,
}

/// Best-effort, at-most-once event fan-out.
///
/// Subscribers join and leave concurrently with `publish`. A subscriber
/// whose channel has closed is dropped from the set without retry or
/// buffering; per-subscriber delivery order matches publish order, with no
/// ordering guarantee across subscribers.
pub struct Broadcaster {
    subscribers: DashMap<u64, UnboundedSender<String>>,
    next_id: AtomicU64,
}

impl Broadcaster {
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a new subscriber and hand back its feed.
    pub fn subscribe(&self) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers.insert(id, sender);
        debug!(subscriber = id, "Subscriber added");
        Subscription {
            id: SubscriberId(id),
            receiver,
        }
    }

    /// Remove a subscriber. Safe to call after it was already evicted.
    pub fn unsubscribe(&self, id: SubscriberId) {
        if self.subscribers.remove(&id.0).is_some() {
            debug!(subscriber = id.0, "Subscriber removed");
        }
    }

    /// Number of currently registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Serialize `{type, data}` once and deliver it to every open
    /// subscriber. Returns how many subscribers the event reached.
    pub fn publish<T: Serialize>(&self, kind: &str, data: &T) -> usize {
        let message = match serde_json::to_string(&Envelope { kind, data }) {
            Ok(json) => json,
            Err(error) => {
                debug!(%error, kind, "Dropping unserializable event");
                return 0;
            }
        };

        let mut delivered = 0;
        let mut closed = Vec::new();
        for entry in self.subscribers.iter() {
            if entry.value().send(message.clone()).is_ok() {
                delivered += 1;
            } else {
                closed.push(*entry.key());
            }
        }
        for id in closed {
            self.subscribers.remove(&id);
        }

        trace!(kind, delivered, "Event published");
        delivered
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    #[serde(rename = "type")]
    kind: &'a str,
    data: &'a T,
}
