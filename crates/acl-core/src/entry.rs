//! # ACL Entries
//!
//! An entry binds a `(resource, action, subject)` triple to a grant or deny
//! value. Entries are immutable: replacing a rule means deleting the old
//! entry and storing a new one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{require_non_empty, AclError, AclResult};

/// Value of an ACL entry.
///
/// Serialized as `"grant"` / `"deny"`. Deserializing any other string fails
/// with [`AclError::UnsupportedValue`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum AclValue {
    /// The action is explicitly granted.
    Grant,
    /// The action is explicitly denied.
    Deny,
}

impl AclValue {
    /// Get the string representation of the value.
    pub fn as_str(&self) -> &'static str {
        match self {
            AclValue::Grant => "grant",
            AclValue::Deny => "deny",
        }
    }

    /// Parse a value from its string representation.
    ///
    /// Accepts `grant`/`deny` (case-insensitive) and the single-letter
    /// codes `G`/`D` used by line-oriented storage formats.
    ///
    /// # Example
    ///
    /// ```
    /// use acl_core::AclValue;
    ///
    /// assert_eq!(AclValue::parse("grant").unwrap(), AclValue::Grant);
    /// assert_eq!(AclValue::parse("D").unwrap(), AclValue::Deny);
    /// assert!(AclValue::parse("maybe").is_err());
    /// ```
    pub fn parse(s: &str) -> AclResult<Self> {
        match s.to_lowercase().as_str() {
            "grant" | "g" => Ok(AclValue::Grant),
            "deny" | "d" => Ok(AclValue::Deny),
            _ => Err(AclError::UnsupportedValue(s.to_string())),
        }
    }

    /// Single-letter storage code (`G` or `D`).
    pub fn code(&self) -> char {
        match self {
            AclValue::Grant => 'G',
            AclValue::Deny => 'D',
        }
    }
}

impl TryFrom<String> for AclValue {
    type Error = AclError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AclValue::parse(&value)
    }
}

impl fmt::Display for AclValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AclValue::Grant => f.write_str("Grant"),
            AclValue::Deny => f.write_str("Deny"),
        }
    }
}

/// A stored ACL rule.
///
/// Identity is the `(resource, action, subject)` triple; the value is not
/// part of it. Two entries that differ only in value compare equal, which
/// is what lets the store treat a second `store_entry` for the same key as
/// a replacement.
///
/// # Example
///
/// ```
/// use acl_core::{AclValue, Entry};
///
/// let grant = Entry::new("P.Main", "Rd_1Pg", "U.alice", AclValue::Grant).unwrap();
/// let deny = Entry::new("P.Main", "Rd_1Pg", "U.alice", AclValue::Deny).unwrap();
/// assert_eq!(grant, deny);
/// assert_eq!(grant.to_string(), "P.Main->Rd_1Pg: U.alice (Grant)");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "EntryRecord")]
pub struct Entry {
    resource: String,
    action: String,
    subject: String,
    value: AclValue,
}

impl Entry {
    /// Create a new entry.
    ///
    /// # Arguments
    ///
    /// * `resource` - The controlled resource name
    /// * `action` - The action code, or [`FULL_CONTROL`](crate::actions::FULL_CONTROL)
    /// * `subject` - The user or group subject
    /// * `value` - Grant or deny
    ///
    /// # Returns
    ///
    /// [`AclError::InvalidArgument`] if any of the strings is empty.
    pub fn new(
        resource: impl Into<String>,
        action: impl Into<String>,
        subject: impl Into<String>,
        value: AclValue,
    ) -> AclResult<Self> {
        let resource = resource.into();
        let action = action.into();
        let subject = subject.into();

        require_non_empty("resource", &resource)?;
        require_non_empty("action", &action)?;
        require_non_empty("subject", &subject)?;

        Ok(Self {
            resource,
            action,
            subject,
            value,
        })
    }

    /// The controlled resource.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The controlled action (may be the full-control sentinel).
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The user or group the rule applies to.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Grant or deny.
    pub fn value(&self) -> AclValue {
        self.value
    }

    /// Whether this entry is a full-control rule.
    pub fn is_full_control(&self) -> bool {
        self.action == crate::actions::FULL_CONTROL
    }

    /// Check whether this entry has the given key.
    pub fn has_key(&self, resource: &str, action: &str, subject: &str) -> bool {
        self.resource == resource && self.action == action && self.subject == subject
    }

    /// Copy of this entry moved to another resource.
    ///
    /// # Returns
    ///
    /// [`AclError::InvalidArgument`] if `resource` is empty.
    pub fn with_resource(&self, resource: impl Into<String>) -> AclResult<Self> {
        Entry::new(resource, self.action.clone(), self.subject.clone(), self.value)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.resource == other.resource
            && self.action == other.action
            && self.subject == other.subject
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.resource.hash(state);
        self.action.hash(state);
        self.subject.hash(state);
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}->{}: {} ({})",
            self.resource, self.action, self.subject, self.value
        )
    }
}

/// Unvalidated wire shape of an [`Entry`].
#[derive(Deserialize)]
struct EntryRecord {
    resource: String,
    action: String,
    subject: String,
    value: AclValue,
}

impl TryFrom<EntryRecord> for Entry {
    type Error = AclError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        Entry::new(record.resource, record.action, record.subject, record.value)
    }
}
