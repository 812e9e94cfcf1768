//! JSON file storer
//!
//! Persists the entry collection as one JSON document:
//!
//! ```text
//! {
//!   "version": 1,
//!   "saved_at": "2026-01-01T00:00:00Z",
//!   "entries": [
//!     { "resource": "P.Main", "action": "Rd_1Pg", "subject": "U.alice", "value": "grant" }
//!   ]
//! }
//! ```
//!
//! Every delta rewrites the document through a temporary file that is then
//! renamed over the original, so a crash leaves either the old or the new
//! document on disk.

use acl_core::Entry;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::storer::Storer;

/// Format version written by this build.
pub const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct AclDocument {
    version: u32,
    saved_at: DateTime<Utc>,
    entries: Vec<Entry>,
}

/// File-backed storer implementation.
///
/// # Example
///
/// ```rust,no_run
/// use acl_store::{AclManager, JsonFileStorer, StoreConfig, StorerBinding};
/// use std::sync::Arc;
///
/// let config = StoreConfig::from_env();
/// let manager = Arc::new(AclManager::from_config(&config));
/// let storer = Arc::new(JsonFileStorer::from_config(&config).unwrap());
/// let _binding = StorerBinding::attach(manager.clone(), storer).unwrap();
/// ```
#[derive(Debug)]
pub struct JsonFileStorer {
    path: PathBuf,
    pretty: bool,
    entries: Mutex<Vec<Entry>>,
}

impl JsonFileStorer {
    /// Open the document at `path`.
    ///
    /// A missing file is an empty collection; it is created on the first
    /// change.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let entries = read_document(&path)?;
        Ok(Self {
            path,
            pretty: true,
            entries: Mutex::new(entries),
        })
    }

    /// Open the document named by the configuration.
    pub fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        let mut storer = Self::open(&config.store_path)?;
        storer.pretty = config.pretty_json;
        Ok(storer)
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, entries: &[Entry]) -> StoreResult<()> {
        let document = AclDocument {
            version: DOCUMENT_VERSION,
            saved_at: Utc::now(),
            entries: entries.to_vec(),
        };
        let json = if self.pretty {
            serde_json::to_vec_pretty(&document)?
        } else {
            serde_json::to_vec(&document)?
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = entries.len(), "saved ACL document");
        Ok(())
    }
}

fn read_document(path: &Path) -> StoreResult<Vec<Entry>> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no ACL document yet");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let document: AclDocument = serde_json::from_slice(&raw)?;
    if document.version != DOCUMENT_VERSION {
        return Err(StoreError::UnsupportedVersion(document.version));
    }

    tracing::debug!(
        path = %path.display(),
        count = document.entries.len(),
        saved_at = %document.saved_at,
        "loaded ACL document"
    );
    Ok(document.entries)
}

impl Storer for JsonFileStorer {
    fn load_all(&self) -> StoreResult<Vec<Entry>> {
        let entries = read_document(&self.path)?;
        *self.entries.lock() = entries.clone();
        Ok(entries)
    }

    fn on_entries_stored(&self, entries: &[Entry]) -> StoreResult<()> {
        let mut persisted = self.entries.lock();
        for entry in entries {
            persisted.retain(|e| e != entry);
            persisted.push(entry.clone());
        }
        self.write(&persisted)
    }

    fn on_entries_deleted(&self, entries: &[Entry]) -> StoreResult<()> {
        let mut persisted = self.entries.lock();
        persisted.retain(|e| !entries.contains(e));
        self.write(&persisted)
    }
}
