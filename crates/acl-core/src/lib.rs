//! # ACL Core
//!
//! Entries, the action catalogue and the authorization evaluator for the
//! wiki access control list.
//!
//! ## Overview
//!
//! The acl-core crate handles:
//! - **Entries**: `(resource, action, subject)` rules with a grant/deny value
//! - **Evaluator**: A pure function that resolves a verdict for a user and
//!   their groups
//! - **Actions**: Action codes per resource type, the full-control sentinel
//!   and the escalation tables
//! - **Naming**: Subject (`U.`/`G.`) and resource (`G`, `N.`, `P.`, `D.`)
//!   naming helpers
//!
//! Storage, change notification and persistence live in `acl-store`.
//!
//! ## Usage
//!
//! ```rust
//! use acl_core::actions::{for_pages, FULL_CONTROL};
//! use acl_core::{authorize, AclValue, Entry, Verdict};
//!
//! let entries = vec![
//!     Entry::new("P.Main", FULL_CONTROL, "G.Admins", AclValue::Grant).unwrap(),
//!     Entry::new("P.Main", for_pages::READ_PAGE, "G.Anonymous", AclValue::Deny).unwrap(),
//! ];
//!
//! let verdict = authorize(
//!     "P.Main",
//!     for_pages::MODIFY_PAGE,
//!     "U.alice",
//!     &["G.Admins"],
//!     &entries,
//! )
//! .unwrap();
//! assert_eq!(verdict, Verdict::Granted);
//! ```
//!
//! ## Verdicts
//!
//! - `Granted` / `Denied`: an applicable rule was found
//! - `Unknown`: no rule applies; callers decide the default

pub mod actions;
pub mod entry;
pub mod error;
pub mod evaluator;
pub mod resources;
pub mod subjects;

mod proptests;

// Re-export main types for convenience
pub use actions::FULL_CONTROL;
pub use entry::{AclValue, Entry};
pub use error::{AclError, AclResult};
pub use evaluator::{authorize, Verdict};
pub use resources::ResourceKind;
pub use subjects::SubjectKind;
