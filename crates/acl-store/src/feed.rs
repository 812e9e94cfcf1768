//! Asynchronous change feed
//!
//! A [`ChangeFeed`] receives a copy of every change event after the
//! synchronous handlers ran. Delivery goes through a bounded broadcast
//! channel: the store never waits for feed consumers, and a consumer that
//! falls behind loses the oldest events.

use thiserror::Error;
use tokio::sync::broadcast;

use crate::change::AclChangedEvent;

/// Change feed error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The manager was dropped
    #[error("Change feed closed")]
    Closed,

    /// The receiver fell behind and missed events
    #[error("Change feed lagged, {0} events skipped")]
    Lagged(u64),

    /// No event is waiting (non-blocking receive only)
    #[error("No change pending")]
    Empty,
}

/// Subscription handle for receiving change events asynchronously.
///
/// # Example
///
/// ```rust,no_run
/// use acl_core::AclValue;
/// use acl_store::AclManager;
///
/// async fn example() {
///     let manager = AclManager::new();
///     let mut feed = manager.watch();
///
///     manager.store_entry("P.Main", "Rd_1Pg", "U.alice", AclValue::Grant).unwrap();
///
///     let event = feed.recv().await.unwrap();
///     println!("{:?} {}", event.change, event.entries.len());
/// }
/// ```
#[derive(Debug)]
pub struct ChangeFeed {
    receiver: broadcast::Receiver<AclChangedEvent>,
}

impl ChangeFeed {
    pub(crate) fn new(receiver: broadcast::Receiver<AclChangedEvent>) -> Self {
        Self { receiver }
    }

    /// Receive the next event.
    pub async fn recv(&mut self) -> Result<AclChangedEvent, FeedError> {
        self.receiver.recv().await.map_err(|e| match e {
            broadcast::error::RecvError::Closed => FeedError::Closed,
            broadcast::error::RecvError::Lagged(n) => FeedError::Lagged(n),
        })
    }

    /// Receive the next event without waiting.
    pub fn try_recv(&mut self) -> Result<AclChangedEvent, FeedError> {
        self.receiver.try_recv().map_err(|e| match e {
            broadcast::error::TryRecvError::Empty => FeedError::Empty,
            broadcast::error::TryRecvError::Closed => FeedError::Closed,
            broadcast::error::TryRecvError::Lagged(n) => FeedError::Lagged(n),
        })
    }
}
