// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subscription registry: per-topic fanout of broker messages to local
//! subscribers.
//!
//! The registry outlives any single broker connection. Topics registered
//! while disconnected are subscription *intents*; the connection task
//! replays every registered topic after each CONNECTED frame, so callers
//! never observe a "not yet connected" subscribe failure. The broker sees
//! at most one SUBSCRIBE per topic regardless of how many local
//! subscribers share it.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

struct Subscriber {
    id: Uuid,
    tx: mpsc::Sender<Value>,
}

#[derive(Default)]
pub struct SubscriptionRegistry {
    topics: Mutex<HashMap<String, Vec<Subscriber>>>,
}

/// Outcome of registering a subscriber.
pub struct Registered {
    pub id: Uuid,
    pub rx: mpsc::Receiver<Value>,
    /// True when this registration created the topic, meaning the broker
    /// does not know about it yet and a SUBSCRIBE frame is due.
    pub topic_created: bool,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a local subscriber for `topic` with a bounded buffer.
    pub fn register(&self, topic: &str, capacity: usize) -> Registered {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let id = Uuid::new_v4();
        let mut topics = self.topics.lock().unwrap_or_else(|e| e.into_inner());
        let entry = topics.entry(topic.to_string()).or_default();
        let topic_created = entry.is_empty();
        entry.push(Subscriber { id, tx });
        debug!(%topic, subscriber = %id, created = topic_created, "subscriber registered");
        Registered {
            id,
            rx,
            topic_created,
        }
    }

    /// Removes one subscriber. Returns true when the topic has no
    /// subscribers left and the broker subscription should be dropped.
    pub fn remove(&self, topic: &str, id: Uuid) -> bool {
        let mut topics = self.topics.lock().unwrap_or_else(|e| e.into_inner());
        let Some(entry) = topics.get_mut(topic) else {
            return false;
        };
        entry.retain(|s| s.id != id);
        if entry.is_empty() {
            topics.remove(topic);
            debug!(%topic, "topic released");
            true
        } else {
            false
        }
    }

    /// Delivers a broker message to every live subscriber of `topic`.
    /// Returns the number of deliveries. Subscribers with full buffers
    /// lose the message rather than stall the read loop.
    pub fn dispatch(&self, topic: &str, payload: &Value) -> usize {
        let mut topics = self.topics.lock().unwrap_or_else(|e| e.into_inner());
        let Some(entry) = topics.get_mut(topic) else {
            debug!(%topic, "message for topic with no subscribers");
            return 0;
        };
        let mut delivered = 0;
        entry.retain(|s| match s.tx.try_send(payload.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(%topic, subscriber = %s.id, "subscriber buffer full, dropping message");
                true
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });
        if entry.is_empty() {
            topics.remove(topic);
        }
        delivered
    }

    /// Topics currently wanted, replayed to the broker on every connect.
    pub fn topics(&self) -> Vec<String> {
        let topics = self.topics.lock().unwrap_or_else(|e| e.into_inner());
        topics.keys().cloned().collect()
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        let topics = self.topics.lock().unwrap_or_else(|e| e.into_inner());
        topics.contains_key(topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_registration_creates_topic_later_ones_share_it() {
        let registry = SubscriptionRegistry::new();
        let first = registry.register("/topic/confirmPrice/JR-1", 8);
        let second = registry.register("/topic/confirmPrice/JR-1", 8);
        assert!(first.topic_created);
        assert!(!second.topic_created);
        assert_eq!(registry.topics().len(), 1);
    }

    #[tokio::test]
    async fn dispatch_reaches_every_subscriber() {
        let registry = SubscriptionRegistry::new();
        let mut a = registry.register("/topic/chat/r1", 8);
        let mut b = registry.register("/topic/chat/r1", 8);

        let delivered = registry.dispatch("/topic/chat/r1", &json!({"content": "hi"}));
        assert_eq!(delivered, 2);
        assert_eq!(a.rx.recv().await.unwrap()["content"], "hi");
        assert_eq!(b.rx.recv().await.unwrap()["content"], "hi");
    }

    #[tokio::test]
    async fn removed_subscriber_receives_nothing_further() {
        let registry = SubscriptionRegistry::new();
        let mut kept = registry.register("/topic/chat/r1", 8);
        let mut gone = registry.register("/topic/chat/r1", 8);

        registry.dispatch("/topic/chat/r1", &json!(1));
        assert!(!registry.remove("/topic/chat/r1", gone.id));
        registry.dispatch("/topic/chat/r1", &json!(2));

        assert_eq!(kept.rx.recv().await.unwrap(), json!(1));
        assert_eq!(kept.rx.recv().await.unwrap(), json!(2));
        // The removed subscriber got the first message but never the second.
        assert_eq!(gone.rx.recv().await.unwrap(), json!(1));
        assert!(gone.rx.try_recv().is_err());
    }

    #[test]
    fn last_removal_releases_topic() {
        let registry = SubscriptionRegistry::new();
        let only = registry.register("/topic/new-job/svc-1", 8);
        assert!(registry.remove("/topic/new-job/svc-1", only.id));
        assert!(!registry.has_topic("/topic/new-job/svc-1"));
    }

    #[test]
    fn dispatch_to_unknown_topic_delivers_zero() {
        let registry = SubscriptionRegistry::new();
        assert_eq!(registry.dispatch("/topic/chat/none", &json!({})), 0);
    }

    #[test]
    fn full_buffer_drops_message_without_evicting_subscriber() {
        let registry = SubscriptionRegistry::new();
        let _sub = registry.register("/topic/worker-location/JR-1", 1);
        assert_eq!(registry.dispatch("/topic/worker-location/JR-1", &json!(1)), 1);
        // Buffer of one is now full; the next dispatch is dropped.
        assert_eq!(registry.dispatch("/topic/worker-location/JR-1", &json!(2)), 0);
        assert!(registry.has_topic("/topic/worker-location/JR-1"));
    }

    #[test]
    fn dropped_receiver_is_evicted_on_dispatch() {
        let registry = SubscriptionRegistry::new();
        let sub = registry.register("/topic/chat/r1", 8);
        drop(sub.rx);
        assert_eq!(registry.dispatch("/topic/chat/r1", &json!({})), 0);
        assert!(!registry.has_topic("/topic/chat/r1"));
    }
}
