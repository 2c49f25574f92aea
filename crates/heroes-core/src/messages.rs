// ── Message log ──
//
// The user-facing notification sink: an append-only list of single-line
// messages with push-based change notification via a `watch` channel.
// Every gateway operation that touches the network writes one line here.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

/// Cheaply cloneable handle to a shared message list.
///
/// Clones share the same underlying list; subscribers see a fresh
/// snapshot after every `add` or `clear`.
#[derive(Clone)]
pub struct MessageLog {
    snapshot: Arc<watch::Sender<Arc<Vec<String>>>>,
}

impl MessageLog {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    /// Append one message.
    pub fn add(&self, message: impl Into<String>) {
        let message = message.into();
        info!(target: "heroes::messages", "{message}");
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| {
            let mut next = Vec::clone(snap);
            next.push(message);
            *snap = Arc::new(next);
        });
    }

    /// Drop every message.
    pub fn clear(&self) {
        self.snapshot.send_modify(|snap| *snap = Arc::new(Vec::new()));
    }

    /// Current messages, oldest first (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<String>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<String>>> {
        self.snapshot.subscribe()
    }

    pub fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MessageLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageLog")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn add_appends_in_order() {
        let log = MessageLog::new();
        log.add("fetched heroes");
        log.add("deleted hero id=12");

        assert_eq!(
            *log.snapshot(),
            vec!["fetched heroes".to_string(), "deleted hero id=12".to_string()]
        );
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn clones_share_the_same_list() {
        let log = MessageLog::new();
        let other = log.clone();
        other.add("updated hero id=7");
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn clear_empties_the_list() {
        let log = MessageLog::new();
        log.add("one");
        log.add("two");
        log.clear();
        assert!(log.is_empty());
        assert!(log.snapshot().is_empty());
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let log = MessageLog::new();
        let mut rx = log.subscribe();

        log.add("fetched hero id=11");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);

        log.clear();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_empty());
    }

    #[test]
    fn earlier_snapshots_are_not_mutated() {
        let log = MessageLog::new();
        log.add("first");
        let before = log.snapshot();
        log.add("second");
        assert_eq!(before.len(), 1);
        assert_eq!(log.snapshot().len(), 2);
    }
}
