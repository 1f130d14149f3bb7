//! In-process fan-out of session changes.
//!
//! The auth provider publishes; the session watcher (and anything else that
//! cares) subscribes. Payloads are typed events rather than JSON.

use tokio::sync::broadcast;

use crate::domains::auth::models::AuthIdentity;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SignedIn(AuthIdentity),
    TokenRefreshed(AuthIdentity),
    SignedOut,
}

/// Thread-safe, cloneable broadcast hub for [`AuthEvent`]s.
#[derive(Clone)]
pub struct AuthEventHub {
    tx: broadcast::Sender<AuthEvent>,
}

impl AuthEventHub {
    /// Default capacity (32 events). Session changes are rare.
    pub fn new() -> Self {
        Self::with_capacity(32)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// No-op if nobody is subscribed.
    pub fn publish(&self, event: AuthEvent) {
        tracing::debug!(?event, subscribers = self.tx.receiver_count(), "Auth event");
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for AuthEventHub {
    fn default() -> Self {
        Self::new()
    }
}

/// One subscriber's view of the event stream. Dropping it unsubscribes.
pub struct Subscription {
    rx: broadcast::Receiver<AuthEvent>,
}

impl Subscription {
    /// Next event, or `None` once the hub is gone. Events missed because the
    /// subscriber fell behind are skipped; only the latest session matters.
    pub async fn next(&mut self) -> Option<AuthEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Auth subscriber lagged behind");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_subscribe_roundtrip() {
        let hub = AuthEventHub::new();
        let mut sub = hub.subscribe();

        hub.publish(AuthEvent::SignedOut);

        assert_eq!(sub.next().await, Some(AuthEvent::SignedOut));
    }

    #[tokio::test]
    async fn test_publish_no_subscribers_is_noop() {
        let hub = AuthEventHub::new();
        // Should not panic
        hub.publish(AuthEvent::SignedOut);
    }

    #[tokio::test]
    async fn test_dropping_subscription_unsubscribes() {
        let hub = AuthEventHub::new();
        let sub = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 1);

        drop(sub);
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_lagging_subscriber_gets_latest() {
        let hub = AuthEventHub::with_capacity(1);
        let mut sub = hub.subscribe();

        hub.publish(AuthEvent::SignedOut);
        hub.publish(AuthEvent::SignedOut);

        assert_eq!(sub.next().await, Some(AuthEvent::SignedOut));
    }

    #[tokio::test]
    async fn test_closed_hub_ends_stream() {
        let hub = AuthEventHub::new();
        let mut sub = hub.subscribe();
        drop(hub);

        assert_eq!(sub.next().await, None);
    }
}
