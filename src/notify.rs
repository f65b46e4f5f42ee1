//! Change-notification bus
//!
//! A lightweight pub/sub channel the provider uses to tell observers that the
//! data at an address may have changed. Events carry only the affected
//! address, never payload data: a subscriber's cached view is stale and it
//! should re-query.
//!
//! Delivery is broadcast and lossy. A slow subscriber that falls behind the
//! channel capacity misses events (`RecvError::Lagged`); since subscribers
//! always re-fetch rather than apply deltas, recovery is a single re-query.

use tokio::sync::broadcast;
use tracing::debug;
use url::Url;

/// Default number of in-flight events retained per subscriber
const DEFAULT_CAPACITY: usize = 64;

/// Event signaling that data at an address may have changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The affected address: the collection address for inserts, the
    /// operation's own address for updates and deletes
    pub address: Url,
}

/// Broadcast bus for [`ChangeEvent`]s.
///
/// Cheap to clone; all clones publish to the same set of subscribers.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to change events.
    ///
    /// Only events published after this call are received.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Publish a change for the given address.
    ///
    /// A send with no live subscribers is not an error; the event is dropped.
    pub fn notify(&self, address: &Url) {
        debug!(address = %address, "data changed");
        let _ = self.sender.send(ChangeEvent {
            address: address.clone(),
        });
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{collection_uri, item_uri, DEFAULT_AUTHORITY};

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let notifier = ChangeNotifier::new();
        let mut rx = notifier.subscribe();

        let address = collection_uri(DEFAULT_AUTHORITY);
        notifier.notify(&address);

        let event = rx.recv().await.expect("event delivered");
        assert_eq!(event.address, address);
    }

    #[tokio::test]
    async fn test_notify_without_subscribers_is_noop() {
        let notifier = ChangeNotifier::new();
        notifier.notify(&item_uri(DEFAULT_AUTHORITY, 1));
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_all_subscribers_see_all_events() {
        let notifier = ChangeNotifier::new();
        let mut rx1 = notifier.subscribe();
        let mut rx2 = notifier.subscribe();

        notifier.notify(&item_uri(DEFAULT_AUTHORITY, 1));
        notifier.notify(&item_uri(DEFAULT_AUTHORITY, 2));

        for rx in [&mut rx1, &mut rx2] {
            let first = rx.recv().await.expect("first event");
            let second = rx.recv().await.expect("second event");
            assert_eq!(first.address, item_uri(DEFAULT_AUTHORITY, 1));
            assert_eq!(second.address, item_uri(DEFAULT_AUTHORITY, 2));
        }
    }
}
