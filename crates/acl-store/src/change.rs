//! Change notifications
//!
//! Every mutation of an [`AclManager`](crate::AclManager) produces an
//! [`AclChangedEvent`]. Handlers run synchronously on the mutating thread
//! while the manager's lock is held, in mutation order.

use acl_core::Entry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Kind of change carried by an event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    /// Entries were added.
    EntryStored,
    /// Entries were removed.
    EntryDeleted,
}

impl Change {
    /// Get the string representation of the change.
    pub fn as_str(&self) -> &'static str {
        match self {
            Change::EntryStored => "entry_stored",
            Change::EntryDeleted => "entry_deleted",
        }
    }
}

/// A change to the entry collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AclChangedEvent {
    /// Affected entries.
    ///
    /// One entry for single store/delete operations, the whole removed batch
    /// for bulk deletes.
    pub entries: Vec<Entry>,

    /// What happened to them.
    pub change: Change,

    /// Position of this event in the manager's event stream, starting at 1.
    pub sequence: u64,

    /// When the change was applied.
    pub occurred_at: DateTime<Utc>,
}

impl AclChangedEvent {
    /// Create a new event.
    pub fn new(entries: Vec<Entry>, change: Change, sequence: u64) -> Self {
        Self {
            entries,
            change,
            sequence,
            occurred_at: Utc::now(),
        }
    }
}

/// Identifies a registered change handler.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct HandlerId(Uuid);

impl HandlerId {
    pub(crate) fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Receives change events.
///
/// Handlers run while the manager's lock is held. Calling back into the
/// same manager from `handle` deadlocks; its `Debug` output is the one
/// exception and reports the state as locked.
pub trait ChangeHandler: Send + Sync {
    /// Handle a change event.
    fn handle(&self, event: &AclChangedEvent);
}

/// Adapter turning a closure into a [`ChangeHandler`].
pub struct FnHandler<F>(pub F);

impl<F> ChangeHandler for FnHandler<F>
where
    F: Fn(&AclChangedEvent) + Send + Sync,
{
    fn handle(&self, event: &AclChangedEvent) {
        (self.0)(event)
    }
}

/// Registered handler with its id.
pub(crate) type Registration = (HandlerId, Arc<dyn ChangeHandler>);
