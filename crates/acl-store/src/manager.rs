//! ACL manager
//!
//! The in-memory, thread-safe store of ACL entries. One coarse lock guards
//! the entry collection and the handler list; every public method holds it
//! for its whole duration, change dispatch included, so mutations and their
//! events are linearized.

use acl_core::error::require_non_empty;
use acl_core::{AclResult, AclValue, Entry, Verdict};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::change::{AclChangedEvent, Change, ChangeHandler, FnHandler, HandlerId, Registration};
use crate::config::StoreConfig;
use crate::feed::ChangeFeed;

/// Manager statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagerStats {
    /// Entries currently stored
    pub total_entries: usize,
    /// Registered change handlers
    pub registered_handlers: usize,
    /// Change events emitted since creation
    pub events_dispatched: u64,
}

#[derive(Default)]
struct State {
    entries: Vec<Entry>,
    handlers: Vec<Registration>,
    last_sequence: u64,
}

/// Thread-safe ACL entry store.
///
/// At most one entry exists per `(resource, action, subject)` key. Reads
/// return copies, so callers (the evaluator in particular) never observe
/// the collection while it changes.
///
/// # Example
///
/// ```
/// use acl_core::{AclValue, Verdict};
/// use acl_store::AclManager;
///
/// let manager = AclManager::new();
/// manager.store_entry("P.Main", "Rd_1Pg", "G.Users", AclValue::Grant).unwrap();
///
/// let verdict = manager.authorize("P.Main", "Rd_1Pg", "U.alice", &["G.Users"]).unwrap();
/// assert_eq!(verdict, Verdict::Granted);
/// assert_eq!(manager.total_entries(), 1);
/// ```
pub struct AclManager {
    state: Mutex<State>,
    feed: broadcast::Sender<AclChangedEvent>,
}

// Never blocks: handlers run under the lock and may format the manager.
impl std::fmt::Debug for AclManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = f.debug_struct("AclManager");
        match self.state.try_lock() {
            Some(state) => out
                .field("entries", &state.entries.len())
                .field("handlers", &state.handlers.len()),
            None => out.field("state", &"<locked>"),
        };
        out.finish()
    }
}

impl Default for AclManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AclManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::with_feed_capacity(StoreConfig::default().feed_capacity)
    }

    /// Create an empty manager with a custom change-feed capacity.
    ///
    /// A capacity of zero is raised to one.
    pub fn with_feed_capacity(capacity: usize) -> Self {
        let (feed, _) = broadcast::channel(capacity.max(1));
        Self {
            state: Mutex::new(State::default()),
            feed,
        }
    }

    /// Create an empty manager from configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_feed_capacity(config.feed_capacity)
    }

    /// Store an entry, replacing any entry with the same key.
    ///
    /// A replaced entry produces an [`Change::EntryDeleted`] event before the
    /// [`Change::EntryStored`] event for the new one.
    ///
    /// # Returns
    ///
    /// `Ok(true)`, or [`AclError::InvalidArgument`](acl_core::AclError::InvalidArgument)
    /// if any string is empty.
    pub fn store_entry(
        &self,
        resource: &str,
        action: &str,
        subject: &str,
        value: AclValue,
    ) -> AclResult<bool> {
        let entry = Entry::new(resource, action, subject, value)?;
        let mut state = self.state.lock();
        self.upsert_locked(&mut state, entry);
        Ok(true)
    }

    /// Delete the entry with the given key.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if an entry was removed. Nothing is emitted otherwise.
    pub fn delete_entry(&self, resource: &str, action: &str, subject: &str) -> AclResult<bool> {
        require_non_empty("resource", resource)?;
        require_non_empty("action", action)?;
        require_non_empty("subject", subject)?;

        let mut state = self.state.lock();
        Ok(self.remove_locked(&mut state, resource, action, subject))
    }

    /// Delete every entry on a resource.
    ///
    /// The removed batch is reported in a single event.
    ///
    /// # Returns
    ///
    /// `Ok(false)` if no entry matched.
    pub fn delete_entries_for_resource(&self, resource: &str) -> AclResult<bool> {
        require_non_empty("resource", resource)?;
        let mut state = self.state.lock();
        let removed = self.remove_where_locked(&mut state, |e| e.resource() == resource);
        tracing::debug!(%resource, count = removed, "deleted entries for resource");
        Ok(removed > 0)
    }

    /// Delete every entry for a subject.
    ///
    /// The removed batch is reported in a single event.
    ///
    /// # Returns
    ///
    /// `Ok(false)` if no entry matched.
    pub fn delete_entries_for_subject(&self, subject: &str) -> AclResult<bool> {
        require_non_empty("subject", subject)?;
        let mut state = self.state.lock();
        let removed = self.remove_where_locked(&mut state, |e| e.subject() == subject);
        tracing::debug!(%subject, count = removed, "deleted entries for subject");
        Ok(removed > 0)
    }

    /// Move every entry from one resource to another.
    ///
    /// Each entry is deleted under `old_resource` and stored under
    /// `new_resource` with the same action, subject and value, emitting a
    /// delete and a store event per entry. If a step fails the rename stops
    /// and returns `Ok(false)`; entries already moved stay moved.
    ///
    /// # Returns
    ///
    /// `Ok(true)` when every entry was moved (including when there was
    /// nothing to move).
    pub fn rename_resource(&self, old_resource: &str, new_resource: &str) -> AclResult<bool> {
        require_non_empty("old_resource", old_resource)?;
        require_non_empty("new_resource", new_resource)?;

        let mut state = self.state.lock();
        let snapshot: Vec<Entry> = state
            .entries
            .iter()
            .filter(|e| e.resource() == old_resource)
            .cloned()
            .collect();

        for entry in &snapshot {
            if !self.remove_locked(&mut state, entry.resource(), entry.action(), entry.subject()) {
                tracing::warn!(%entry, "rename aborted, entry vanished");
                return Ok(false);
            }
            let moved = entry.with_resource(new_resource)?;
            self.upsert_locked(&mut state, moved);
        }

        tracing::debug!(
            %old_resource,
            %new_resource,
            count = snapshot.len(),
            "renamed resource"
        );
        Ok(true)
    }

    /// Copy of all entries, in insertion order.
    pub fn retrieve_all_entries(&self) -> Vec<Entry> {
        self.state.lock().entries.clone()
    }

    /// Copy of the entries on a resource.
    pub fn retrieve_entries_for_resource(&self, resource: &str) -> AclResult<Vec<Entry>> {
        require_non_empty("resource", resource)?;
        Ok(self.collect(|e| e.resource() == resource))
    }

    /// Copy of the entries for a subject.
    pub fn retrieve_entries_for_subject(&self, subject: &str) -> AclResult<Vec<Entry>> {
        require_non_empty("subject", subject)?;
        Ok(self.collect(|e| e.subject() == subject))
    }

    /// Replace the whole collection.
    ///
    /// Used to seed the manager from a storer at startup. No change events
    /// are emitted. If `entries` holds the same key more than once, the
    /// last occurrence wins.
    pub fn initialize_data(&self, entries: Vec<Entry>) {
        let unique = dedupe(entries);
        let mut state = self.state.lock();
        state.entries = unique;
        tracing::debug!(count = state.entries.len(), "initialized entries");
    }

    /// Replace the whole collection and register `handler`, atomically.
    ///
    /// No mutation can land between the two steps, so the handler sees
    /// every change made after `entries` became the content. Duplicate keys
    /// are handled as in [`AclManager::initialize_data`].
    pub fn initialize_and_subscribe(
        &self,
        entries: Vec<Entry>,
        handler: Arc<dyn ChangeHandler>,
    ) -> HandlerId {
        let unique = dedupe(entries);
        let id = HandlerId::new();
        let mut state = self.state.lock();
        state.entries = unique;
        state.handlers.push((id, handler));
        tracing::debug!(count = state.entries.len(), handler = %id, "initialized entries");
        id
    }

    /// Number of stored entries.
    pub fn total_entries(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Register a change handler.
    ///
    /// The handler runs synchronously, under the manager's lock, for every
    /// subsequent change. It must not call back into this manager other than
    /// through `Debug`.
    pub fn subscribe(&self, handler: Arc<dyn ChangeHandler>) -> HandlerId {
        let id = HandlerId::new();
        self.state.lock().handlers.push((id, handler));
        id
    }

    /// Register a closure as change handler.
    pub fn subscribe_fn<F>(&self, f: F) -> HandlerId
    where
        F: Fn(&AclChangedEvent) + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(FnHandler(f)))
    }

    /// Remove a change handler.
    ///
    /// # Returns
    ///
    /// `true` if the handler was registered.
    pub fn unsubscribe(&self, id: HandlerId) -> bool {
        let mut state = self.state.lock();
        let before = state.handlers.len();
        state.handlers.retain(|(registered, _)| *registered != id);
        state.handlers.len() != before
    }

    /// Receive change events asynchronously.
    ///
    /// Only events emitted after this call are delivered.
    pub fn watch(&self) -> ChangeFeed {
        ChangeFeed::new(self.feed.subscribe())
    }

    /// Evaluate a request against the entries currently on `resource`.
    ///
    /// The entries are copied under the lock; evaluation runs without it.
    pub fn authorize<G: AsRef<str>>(
        &self,
        resource: &str,
        action: &str,
        user: &str,
        groups: &[G],
    ) -> AclResult<Verdict> {
        let entries = self.retrieve_entries_for_resource(resource)?;
        acl_core::authorize(resource, action, user, groups, &entries)
    }

    /// Get manager statistics.
    pub fn stats(&self) -> ManagerStats {
        let state = self.state.lock();
        ManagerStats {
            total_entries: state.entries.len(),
            registered_handlers: state.handlers.len(),
            events_dispatched: state.last_sequence,
        }
    }

    fn collect(&self, predicate: impl Fn(&Entry) -> bool) -> Vec<Entry> {
        self.state
            .lock()
            .entries
            .iter()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }

    fn upsert_locked(&self, state: &mut State, entry: Entry) {
        if let Some(pos) = state.entries.iter().position(|e| e == &entry) {
            let old = state.entries.remove(pos);
            self.emit_locked(state, vec![old], Change::EntryDeleted);
        }
        tracing::debug!(
            resource = %entry.resource(),
            action = %entry.action(),
            subject = %entry.subject(),
            value = %entry.value(),
            "stored entry"
        );
        state.entries.push(entry.clone());
        self.emit_locked(state, vec![entry], Change::EntryStored);
    }

    fn remove_locked(&self, state: &mut State, resource: &str, action: &str, subject: &str) -> bool {
        let Some(pos) = state
            .entries
            .iter()
            .position(|e| e.has_key(resource, action, subject))
        else {
            return false;
        };

        let old = state.entries.remove(pos);
        tracing::debug!(%resource, %action, %subject, "deleted entry");
        self.emit_locked(state, vec![old], Change::EntryDeleted);
        true
    }

    fn remove_where_locked(&self, state: &mut State, predicate: impl Fn(&Entry) -> bool) -> usize {
        let (removed, kept): (Vec<Entry>, Vec<Entry>) =
            std::mem::take(&mut state.entries).into_iter().partition(|e| predicate(e));
        state.entries = kept;

        let count = removed.len();
        if count > 0 {
            self.emit_locked(state, removed, Change::EntryDeleted);
        }
        count
    }

    fn emit_locked(&self, state: &mut State, entries: Vec<Entry>, change: Change) {
        state.last_sequence += 1;
        let event = AclChangedEvent::new(entries, change, state.last_sequence);

        for (_, handler) in &state.handlers {
            handler.handle(&event);
        }

        if self.feed.receiver_count() > 0 {
            // No receivers left is not an error for the store.
            let _ = self.feed.send(event);
        }
    }
}

/// Drop repeated keys, keeping the last occurrence at its position.
fn dedupe(entries: Vec<Entry>) -> Vec<Entry> {
    let total = entries.len();
    let mut slots: Vec<Option<Entry>> = Vec::with_capacity(total);
    let mut index: HashMap<Entry, usize> = HashMap::with_capacity(total);

    for entry in entries {
        if let Some(pos) = index.remove(&entry) {
            slots[pos] = None;
        }
        index.insert(entry.clone(), slots.len());
        slots.push(Some(entry));
    }

    let unique: Vec<Entry> = slots.into_iter().flatten().collect();
    if unique.len() != total {
        tracing::warn!(
            duplicates = total - unique.len(),
            "dropped duplicate keys while initializing"
        );
    }
    unique
}
