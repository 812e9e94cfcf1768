//! # ACL Store
//!
//! The in-memory ACL manager, its change notifications and the persistence
//! bindings for the wiki access control list.
//!
//! ## Overview
//!
//! The acl-store crate handles:
//! - **Manager**: A thread-safe entry collection with store, delete, rename
//!   and query operations
//! - **Change Events**: Synchronous handlers invoked under the manager's lock
//!   and an asynchronous broadcast feed
//! - **Persistence**: The [`Storer`] contract and a binding that keeps a
//!   storer subscribed for as long as it lives
//!
//! ## Features
//!
//! - `file` (default): JSON document storer
//!
//! ## Usage
//!
//! ### Managing Entries
//!
//! ```rust
//! use acl_core::{AclValue, Verdict};
//! use acl_store::AclManager;
//!
//! let manager = AclManager::new();
//! manager.store_entry("P.Main", "*", "G.Admins", AclValue::Grant).unwrap();
//! manager.store_entry("P.Main", "Rd_1Pg", "U.guest", AclValue::Deny).unwrap();
//!
//! let verdict = manager
//!     .authorize("P.Main", "Mod_1Pg", "U.alice", &["G.Admins"])
//!     .unwrap();
//! assert_eq!(verdict, Verdict::Granted);
//! ```
//!
//! ### Watching Changes
//!
//! ```rust,no_run
//! use acl_core::AclValue;
//! use acl_store::AclManager;
//!
//! # async fn example() {
//! let manager = AclManager::new();
//! let mut feed = manager.watch();
//!
//! manager.store_entry("P.Main", "Rd_1Pg", "U.alice", AclValue::Grant).unwrap();
//!
//! let event = feed.recv().await.unwrap();
//! println!("{} #{}", event.change.as_str(), event.sequence);
//! # }
//! ```
//!
//! ### Persisting to Disk
//!
//! ```rust,no_run
//! use acl_store::{AclManager, JsonFileStorer, StorerBinding};
//! use std::sync::Arc;
//!
//! let manager = Arc::new(AclManager::new());
//! let storer = Arc::new(JsonFileStorer::open("acl.json").unwrap());
//! let binding = StorerBinding::attach(manager.clone(), storer).unwrap();
//! // ... mutations are written to acl.json until `binding` is dropped
//! drop(binding);
//! ```

pub mod change;
pub mod config;
pub mod error;
pub mod feed;
pub mod manager;
pub mod memory;
pub mod storer;

#[cfg(feature = "file")]
pub mod file;

// Re-export main types for convenience
pub use change::{AclChangedEvent, Change, ChangeHandler, FnHandler, HandlerId};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use feed::{ChangeFeed, FeedError};
pub use manager::{AclManager, ManagerStats};
pub use memory::MemoryStorer;
pub use storer::{Storer, StorerBinding};

#[cfg(feature = "file")]
pub use file::JsonFileStorer;
