//! Persistence contract
//!
//! A [`Storer`] mirrors the manager's entries to a backing medium. It is
//! bound to a manager with [`StorerBinding::attach`], which seeds the
//! manager from the storer and subscribes the storer to change events for
//! as long as the binding lives.
//!
//! ## Architecture
//!
//! ```text
//! caller ── store/delete/rename ──> AclManager ── AclChangedEvent ──> StorerBinding
//!                                        ^                                  │
//!                                        └──── initialize_data(load_all) ───┤
//!                                                                           v
//!                                                               Storer (memory, file, ...)
//! ```
//!
//! Persistence failures are the storer's concern: the binding logs them and
//! the mutation that triggered them still succeeds.

use acl_core::Entry;
use std::sync::Arc;

use crate::change::{AclChangedEvent, Change, ChangeHandler, HandlerId};
use crate::error::StoreResult;
use crate::manager::AclManager;

/// Backing medium for ACL entries.
pub trait Storer: Send + Sync {
    /// Load every persisted entry.
    ///
    /// Called once when the storer is attached.
    fn load_all(&self) -> StoreResult<Vec<Entry>>;

    /// Persist newly stored entries.
    fn on_entries_stored(&self, entries: &[Entry]) -> StoreResult<()>;

    /// Persist deleted entries.
    fn on_entries_deleted(&self, entries: &[Entry]) -> StoreResult<()>;
}

/// Change handler forwarding events to a storer.
struct StorerHandler {
    storer: Arc<dyn Storer>,
}

impl ChangeHandler for StorerHandler {
    fn handle(&self, event: &AclChangedEvent) {
        let result = match event.change {
            Change::EntryStored => self.storer.on_entries_stored(&event.entries),
            Change::EntryDeleted => self.storer.on_entries_deleted(&event.entries),
        };

        if let Err(e) = result {
            tracing::error!(
                change = event.change.as_str(),
                sequence = event.sequence,
                count = event.entries.len(),
                error = %e,
                "failed to persist ACL change"
            );
        }
    }
}

/// A storer subscribed to a manager.
///
/// Dropping the binding unsubscribes the storer, on every exit path.
///
/// # Example
///
/// ```
/// use acl_core::AclValue;
/// use acl_store::{AclManager, MemoryStorer, StorerBinding};
/// use std::sync::Arc;
///
/// let manager = Arc::new(AclManager::new());
/// let storer = Arc::new(MemoryStorer::new());
///
/// {
///     let _binding = StorerBinding::attach(manager.clone(), storer.clone()).unwrap();
///     manager.store_entry("P.Main", "Rd_1Pg", "U.alice", AclValue::Grant).unwrap();
/// }
///
/// // Detached: later changes are no longer persisted.
/// manager.store_entry("P.Main", "Mod_1Pg", "U.alice", AclValue::Grant).unwrap();
/// assert_eq!(storer.entries().len(), 1);
/// ```
pub struct StorerBinding {
    manager: Arc<AclManager>,
    handler_id: Option<HandlerId>,
}

impl std::fmt::Debug for StorerBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorerBinding")
            .field("handler_id", &self.handler_id)
            .finish()
    }
}

impl StorerBinding {
    /// Seed `manager` from `storer` and subscribe the storer to changes.
    ///
    /// The manager's current content is replaced by what the storer loads.
    ///
    /// # Returns
    ///
    /// The error from [`Storer::load_all`]; the manager is left untouched
    /// and nothing is subscribed in that case.
    pub fn attach(manager: Arc<AclManager>, storer: Arc<dyn Storer>) -> StoreResult<Self> {
        let entries = storer.load_all()?;
        let count = entries.len();
        let handler_id =
            manager.initialize_and_subscribe(entries, Arc::new(StorerHandler { storer }));
        tracing::info!(handler = %handler_id, count, "storer attached");

        Ok(Self {
            manager,
            handler_id: Some(handler_id),
        })
    }

    /// Id of the change handler registered for the storer.
    pub fn handler_id(&self) -> Option<HandlerId> {
        self.handler_id
    }

    /// Unsubscribe the storer now.
    ///
    /// # Returns
    ///
    /// `true` if the storer was still subscribed.
    pub fn detach(mut self) -> bool {
        self.unsubscribe()
    }

    fn unsubscribe(&mut self) -> bool {
        let Some(id) = self.handler_id.take() else {
            return false;
        };
        let removed = self.manager.unsubscribe(id);
        tracing::info!(handler = %id, "storer detached");
        removed
    }
}

impl Drop for StorerBinding {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::memory::MemoryStorer;
    use acl_core::AclValue;

    struct BrokenStorer;

    impl Storer for BrokenStorer {
        fn load_all(&self) -> StoreResult<Vec<Entry>> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into())
        }

        fn on_entries_stored(&self, _entries: &[Entry]) -> StoreResult<()> {
            Err(StoreError::UnsupportedVersion(0))
        }

        fn on_entries_deleted(&self, _entries: &[Entry]) -> StoreResult<()> {
            Err(StoreError::UnsupportedVersion(0))
        }
    }

    struct WriteOnlyBroken;

    impl Storer for WriteOnlyBroken {
        fn load_all(&self) -> StoreResult<Vec<Entry>> {
            Ok(Vec::new())
        }

        fn on_entries_stored(&self, _entries: &[Entry]) -> StoreResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into())
        }

        fn on_entries_deleted(&self, _entries: &[Entry]) -> StoreResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_attach_seeds_manager() {
        let manager = Arc::new(AclManager::new());
        manager.store_entry("P.Stale", "Rd_1Pg", "U.x", AclValue::Grant).unwrap();

        let storer = Arc::new(MemoryStorer::with_entries(vec![Entry::new(
            "P.Main",
            "Rd_1Pg",
            "U.alice",
            AclValue::Deny,
        )
        .unwrap()]));
        let _binding = StorerBinding::attach(manager.clone(), storer).unwrap();

        let all = manager.retrieve_all_entries();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].resource(), "P.Main");
    }

    #[test]
    fn test_binding_mirrors_changes() {
        let manager = Arc::new(AclManager::new());
        let storer = Arc::new(MemoryStorer::new());
        let _binding = StorerBinding::attach(manager.clone(), storer.clone()).unwrap();

        manager.store_entry("P.Main", "Rd_1Pg", "U.alice", AclValue::Grant).unwrap();
        manager.store_entry("P.Main", "Rd_1Pg", "U.alice", AclValue::Deny).unwrap();
        manager.store_entry("P.Main", "Mod_1Pg", "U.bob", AclValue::Grant).unwrap();
        manager.rename_resource("P.Main", "P.Home").unwrap();
        manager.delete_entries_for_subject("U.bob").unwrap();

        let persisted = storer.entries();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].resource(), "P.Home");
        assert_eq!(persisted[0].value(), AclValue::Deny);
    }

    #[test]
    fn test_failed_load_leaves_manager_untouched() {
        let manager = Arc::new(AclManager::new());
        manager.store_entry("P.Main", "Rd_1Pg", "U.alice", AclValue::Grant).unwrap();

        let err = StorerBinding::attach(manager.clone(), Arc::new(BrokenStorer)).unwrap_err();
        assert!(err.is_io());
        assert_eq!(manager.total_entries(), 1);
        assert_eq!(manager.stats().registered_handlers, 0);
    }

    #[test]
    fn test_persistence_failure_does_not_fail_mutation() {
        let manager = Arc::new(AclManager::new());
        let _binding = StorerBinding::attach(manager.clone(), Arc::new(WriteOnlyBroken)).unwrap();

        assert!(manager
            .store_entry("P.Main", "Rd_1Pg", "U.alice", AclValue::Grant)
            .unwrap());
        assert_eq!(manager.total_entries(), 1);
    }

    #[test]
    fn test_drop_and_detach_unsubscribe() {
        let manager = Arc::new(AclManager::new());
        let storer = Arc::new(MemoryStorer::new());

        let binding = StorerBinding::attach(manager.clone(), storer.clone()).unwrap();
        assert!(binding.handler_id().is_some());
        assert_eq!(manager.stats().registered_handlers, 1);
        assert!(binding.detach());
        assert_eq!(manager.stats().registered_handlers, 0);

        {
            let _binding = StorerBinding::attach(manager.clone(), storer.clone()).unwrap();
            assert_eq!(manager.stats().registered_handlers, 1);
        }
        assert_eq!(manager.stats().registered_handlers, 0);
    }

    #[test]
    fn test_attach_during_writes_keeps_storer_in_step() {
        for _ in 0..50 {
            let manager = Arc::new(AclManager::new());
            let storer = Arc::new(MemoryStorer::new());

            let writer = {
                let manager = manager.clone();
                std::thread::spawn(move || {
                    for i in 0..200 {
                        manager
                            .store_entry(&format!("P.Page{i}"), "Rd_1Pg", "U.alice", AclValue::Grant)
                            .unwrap();
                    }
                })
            };
            let _binding = StorerBinding::attach(manager.clone(), storer.clone()).unwrap();
            writer.join().unwrap();

            let mut in_manager: Vec<String> = manager
                .retrieve_all_entries()
                .iter()
                .map(|e| e.resource().to_string())
                .collect();
            let mut in_storer: Vec<String> = storer
                .entries()
                .iter()
                .map(|e| e.resource().to_string())
                .collect();
            in_manager.sort();
            in_storer.sort();
            assert_eq!(in_manager, in_storer);
        }
    }
}
