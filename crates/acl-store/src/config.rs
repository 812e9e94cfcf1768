//! Store configuration.
//!
//! Configuration is loaded from environment variables with defaults
//! suitable for local development.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{StoreError, StoreResult};

/// Configuration for the ACL manager and the file storer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the JSON document written by the file storer.
    pub store_path: PathBuf,

    /// Capacity of the asynchronous change feed.
    pub feed_capacity: usize,

    /// Whether the file storer pretty-prints its document.
    pub pretty_json: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("acl.json"),
            feed_capacity: 1024,
            pretty_json: true,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ACL_STORE_PATH`: File storer document path (default: acl.json)
    /// - `ACL_FEED_CAPACITY`: Change feed capacity (default: 1024)
    /// - `ACL_PRETTY_JSON`: Pretty-print the document (default: true)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            store_path: std::env::var("ACL_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(default.store_path),
            feed_capacity: std::env::var("ACL_FEED_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.feed_capacity),
            pretty_json: std::env::var("ACL_PRETTY_JSON")
                .map(|s| s != "false" && s != "0")
                .unwrap_or(default.pretty_json),
        }
    }

    /// Set the document path.
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.store_path.as_os_str().is_empty() {
            return Err(StoreError::Config {
                key: "ACL_STORE_PATH".to_string(),
                message: "path cannot be empty".to_string(),
            });
        }
        if self.feed_capacity == 0 {
            return Err(StoreError::Config {
                key: "ACL_FEED_CAPACITY".to_string(),
                message: "capacity must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
