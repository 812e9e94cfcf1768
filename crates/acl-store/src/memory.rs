//! In-memory storer
//!
//! Keeps a mirror of the manager's entries in process memory. Suitable for
//! tests and for embedding where persistence is handled elsewhere.

use acl_core::Entry;
use parking_lot::Mutex;

use crate::error::StoreResult;
use crate::storer::Storer;

/// In-memory storer implementation.
#[derive(Debug, Default)]
pub struct MemoryStorer {
    entries: Mutex<Vec<Entry>>,
}

impl MemoryStorer {
    /// Create an empty storer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storer pre-populated with entries.
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Copy of the persisted entries.
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.lock().clone()
    }
}

impl Storer for MemoryStorer {
    fn load_all(&self) -> StoreResult<Vec<Entry>> {
        Ok(self.entries())
    }

    fn on_entries_stored(&self, entries: &[Entry]) -> StoreResult<()> {
        let mut persisted = self.entries.lock();
        for entry in entries {
            persisted.retain(|e| e != entry);
            persisted.push(entry.clone());
        }
        Ok(())
    }

    fn on_entries_deleted(&self, entries: &[Entry]) -> StoreResult<()> {
        self.entries.lock().retain(|e| !entries.contains(e));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acl_core::AclValue;

    fn entry(resource: &str, value: AclValue) -> Entry {
        Entry::new(resource, "Rd_1Pg", "U.alice", value).unwrap()
    }

    #[test]
    fn test_stored_replaces_by_key() {
        let storer = MemoryStorer::new();
        storer.on_entries_stored(&[entry("P.Main", AclValue::Grant)]).unwrap();
        storer.on_entries_stored(&[entry("P.Main", AclValue::Deny)]).unwrap();

        let entries = storer.load_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value(), AclValue::Deny);
    }

    #[test]
    fn test_deleted_removes_batch() {
        let storer = MemoryStorer::with_entries(vec![
            entry("P.A", AclValue::Grant),
            entry("P.B", AclValue::Grant),
            entry("P.C", AclValue::Grant),
        ]);

        storer
            .on_entries_deleted(&[entry("P.A", AclValue::Grant), entry("P.C", AclValue::Deny)])
            .unwrap();

        let entries = storer.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].resource(), "P.B");
    }
}
