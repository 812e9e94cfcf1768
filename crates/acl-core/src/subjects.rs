//! # Subjects
//!
//! Subjects are plain strings whose prefix tells users from groups
//! (`U.alice`, `G.Editors`). The evaluator treats them as opaque; these
//! helpers exist so callers build them consistently.

use serde::{Deserialize, Serialize};

use crate::error::{require_non_empty, AclResult};

/// Prefix of user subjects.
pub const USER_PREFIX: &str = "U.";

/// Prefix of group subjects.
pub const GROUP_PREFIX: &str = "G.";

/// Kind of subject, derived from its prefix.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    /// A single user account.
    User,
    /// A user group.
    Group,
}

impl SubjectKind {
    /// Classify a subject string.
    ///
    /// # Returns
    ///
    /// `None` if the subject carries neither prefix.
    ///
    /// # Example
    ///
    /// ```
    /// use acl_core::subjects::SubjectKind;
    ///
    /// assert_eq!(SubjectKind::of("U.alice"), Some(SubjectKind::User));
    /// assert_eq!(SubjectKind::of("G.Editors"), Some(SubjectKind::Group));
    /// assert_eq!(SubjectKind::of("alice"), None);
    /// ```
    pub fn of(subject: &str) -> Option<Self> {
        if subject.starts_with(USER_PREFIX) {
            Some(SubjectKind::User)
        } else if subject.starts_with(GROUP_PREFIX) {
            Some(SubjectKind::Group)
        } else {
            None
        }
    }

    /// The prefix used for this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            SubjectKind::User => USER_PREFIX,
            SubjectKind::Group => GROUP_PREFIX,
        }
    }
}

/// Build the subject for a user name.
///
/// # Example
///
/// ```
/// use acl_core::subjects::user_subject;
///
/// assert_eq!(user_subject("alice").unwrap(), "U.alice");
/// ```
pub fn user_subject(username: &str) -> AclResult<String> {
    require_non_empty("username", username)?;
    Ok(format!("{USER_PREFIX}{username}"))
}

/// Build the subject for a group name.
pub fn group_subject(group: &str) -> AclResult<String> {
    require_non_empty("group", group)?;
    Ok(format!("{GROUP_PREFIX}{group}"))
}

/// Build group subjects for every group a user belongs to.
///
/// Fails on the first empty group name.
pub fn group_subjects<I, S>(groups: I) -> AclResult<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    groups
        .into_iter()
        .map(|g| group_subject(g.as_ref()))
        .collect()
}
