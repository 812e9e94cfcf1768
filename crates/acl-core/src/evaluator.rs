//! # Evaluator
//!
//! Computes an authorization verdict from a snapshot of entries, a user
//! subject and the user's group subjects. The evaluator holds no state and
//! takes no locks; callers hand it copies taken from the store.
//!
//! ## Precedence
//!
//! ```text
//! 1. user rule on the requested action
//! 2. user full-control rule
//! 3. any group's explicit deny on the requested action
//! 4. any group's explicit grant on the requested action
//! 5. group full-control rules, deny wins when groups disagree
//! 6. Unknown
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::actions::FULL_CONTROL;
use crate::entry::{AclValue, Entry};
use crate::error::{require_non_empty, AclError, AclResult};

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// An applicable rule grants the action.
    Granted,
    /// An applicable rule denies the action.
    Denied,
    /// No rule applies.
    Unknown,
}

impl Verdict {
    /// Get the string representation of the verdict.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Granted => "granted",
            Verdict::Denied => "denied",
            Verdict::Unknown => "unknown",
        }
    }

    /// `true` only for [`Verdict::Granted`].
    pub fn is_granted(&self) -> bool {
        matches!(self, Verdict::Granted)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AclValue> for Verdict {
    fn from(value: AclValue) -> Self {
        match value {
            AclValue::Grant => Verdict::Granted,
            AclValue::Deny => Verdict::Denied,
        }
    }
}

/// Per-group flags collected while scanning group rules.
#[derive(Debug, Default, Clone, Copy)]
struct GroupRules {
    explicit_grant: bool,
    full_control_grant: bool,
    full_control_deny: bool,
}

/// Decide whether `user` may perform `action` on `resource`.
///
/// # Arguments
///
/// * `resource` - The resource being accessed
/// * `action` - The requested action; must not be [`FULL_CONTROL`]
/// * `user` - The exact user subject (e.g. `U.alice`)
/// * `groups` - The exact group subjects the user belongs to
/// * `entries` - The rules to evaluate, usually a snapshot for `resource`
///
/// # Returns
///
/// The verdict, [`AclError::InvalidArgument`] for an empty `resource`,
/// `action` or `user`, or [`AclError::Disallowed`] when `action` is the
/// full-control sentinel.
///
/// # Example
///
/// ```
/// use acl_core::{authorize, AclValue, Entry, Verdict};
///
/// let entries = vec![
///     Entry::new("P.Main", "Rd_1Pg", "U.alice", AclValue::Deny).unwrap(),
///     Entry::new("P.Main", "Rd_1Pg", "G.Users", AclValue::Grant).unwrap(),
/// ];
///
/// let verdict = authorize("P.Main", "Rd_1Pg", "U.alice", &["G.Users"], &entries).unwrap();
/// assert_eq!(verdict, Verdict::Denied);
///
/// let verdict = authorize("P.Main", "Rd_1Pg", "U.bob", &["G.Users"], &entries).unwrap();
/// assert_eq!(verdict, Verdict::Granted);
/// ```
pub fn authorize<G: AsRef<str>>(
    resource: &str,
    action: &str,
    user: &str,
    groups: &[G],
    entries: &[Entry],
) -> AclResult<Verdict> {
    require_non_empty("resource", resource)?;
    require_non_empty("action", action)?;
    require_non_empty("user", user)?;
    if action == FULL_CONTROL {
        return Err(AclError::Disallowed(action.to_string()));
    }

    if let Some(entry) = user_rule(resource, action, user, entries) {
        tracing::trace!(%resource, %action, %user, rule = %entry, "user rule applied");
        return Ok(entry.value().into());
    }

    let mut flags: HashMap<&str, GroupRules> = HashMap::new();
    for group in groups {
        let group = group.as_ref();
        for entry in entries
            .iter()
            .filter(|e| e.resource() == resource && e.subject() == group)
        {
            let explicit = entry.action() == action;
            if !explicit && !entry.is_full_control() {
                continue;
            }

            let rules = flags.entry(group).or_default();
            match (explicit, entry.value()) {
                (true, AclValue::Deny) => {
                    tracing::trace!(%resource, %action, %group, "group explicit deny");
                    return Ok(Verdict::Denied);
                }
                (true, AclValue::Grant) => rules.explicit_grant = true,
                (false, AclValue::Deny) => rules.full_control_deny = true,
                (false, AclValue::Grant) => rules.full_control_grant = true,
            }
        }
    }

    // No group carries an explicit deny past this point.
    let mut tentative_grant = false;
    let mut tentative_deny = false;
    for (group, rules) in &flags {
        if rules.explicit_grant {
            tracing::trace!(%resource, %action, group = %group, "group explicit grant");
            return Ok(Verdict::Granted);
        }
        if rules.full_control_grant && !rules.full_control_deny {
            tentative_grant = true;
        }
        if rules.full_control_deny && !rules.full_control_grant {
            tentative_deny = true;
        }
    }

    let verdict = if tentative_grant && !tentative_deny {
        Verdict::Granted
    } else if tentative_deny {
        Verdict::Denied
    } else {
        Verdict::Unknown
    };
    tracing::trace!(%resource, %action, %user, %verdict, "group full-control consensus");
    Ok(verdict)
}

/// Find the rule for `user` on `resource`.
///
/// Rules on the exact action come before full-control rules, regardless of
/// how action codes compare as strings.
fn user_rule<'a>(
    resource: &str,
    action: &str,
    user: &str,
    entries: &'a [Entry],
) -> Option<&'a Entry> {
    let mut full_control = None;
    for entry in entries
        .iter()
        .filter(|e| e.resource() == resource && e.subject() == user)
    {
        if entry.action() == action {
            return Some(entry);
        }
        if full_control.is_none() && entry.is_full_control() {
            full_control = Some(entry);
        }
    }
    full_control
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: &str = "P.Main";
    const A: &str = "Rd_1Pg";

    fn entry(resource: &str, action: &str, subject: &str, value: AclValue) -> Entry {
        Entry::new(resource, action, subject, value).unwrap()
    }

    fn check(user: &str, groups: &[&str], entries: &[Entry]) -> Verdict {
        authorize(R, A, user, groups, entries).unwrap()
    }

    #[test]
    fn test_argument_validation() {
        let none: &[&str] = &[];
        assert_eq!(
            authorize("", A, "U.a", none, &[]),
            Err(AclError::InvalidArgument("resource"))
        );
        assert_eq!(
            authorize(R, "", "U.a", none, &[]),
            Err(AclError::InvalidArgument("action"))
        );
        assert_eq!(
            authorize(R, A, "", none, &[]),
            Err(AclError::InvalidArgument("user"))
        );
        assert_eq!(
            authorize(R, FULL_CONTROL, "U.a", none, &[]),
            Err(AclError::Disallowed("*".to_string()))
        );
    }

    #[test]
    fn test_no_applicable_rule() {
        assert_eq!(check("U.alice", &["G.users"], &[]), Verdict::Unknown);

        let unrelated = vec![
            entry("P.Other", A, "U.alice", AclValue::Grant),
            entry(R, A, "U.bob", AclValue::Deny),
            entry(R, A, "G.others", AclValue::Deny),
            entry(R, "Mod_1Pg", "G.users", AclValue::Deny),
        ];
        assert_eq!(check("U.alice", &["G.users"], &unrelated), Verdict::Unknown);
    }

    #[test]
    fn test_user_explicit_deny_overrides_group_grant() {
        let entries = vec![
            entry(R, A, "U.alice", AclValue::Deny),
            entry(R, A, "G.users", AclValue::Grant),
        ];
        assert_eq!(check("U.alice", &["G.users"], &entries), Verdict::Denied);
    }

    #[test]
    fn test_user_grant_overrides_group_deny() {
        let entries = vec![
            entry(R, A, "G.users", AclValue::Deny),
            entry(R, FULL_CONTROL, "U.alice", AclValue::Grant),
        ];
        assert_eq!(check("U.alice", &["G.users"], &entries), Verdict::Granted);
    }

    #[test]
    fn test_user_specific_action_beats_user_full_control() {
        let entries = vec![
            entry(R, FULL_CONTROL, "U.alice", AclValue::Grant),
            entry(R, A, "U.alice", AclValue::Deny),
        ];
        assert_eq!(check("U.alice", &[], &entries), Verdict::Denied);

        let entries = vec![
            entry(R, FULL_CONTROL, "U.alice", AclValue::Deny),
            entry(R, A, "U.alice", AclValue::Grant),
        ];
        assert_eq!(check("U.alice", &[], &entries), Verdict::Granted);
    }

    #[test]
    fn test_ordering_independent_of_action_spelling() {
        // "!" sorts before "*"; the exact-action rule must still win.
        let entries = vec![
            entry(R, FULL_CONTROL, "U.alice", AclValue::Grant),
            entry(R, "!", "U.alice", AclValue::Deny),
        ];
        let verdict = authorize(R, "!", "U.alice", &[] as &[&str], &entries).unwrap();
        assert_eq!(verdict, Verdict::Denied);
    }

    #[test]
    fn test_user_full_control_applies_to_any_action() {
        let entries = vec![entry(R, FULL_CONTROL, "U.alice", AclValue::Deny)];
        assert_eq!(check("U.alice", &[], &entries), Verdict::Denied);
    }

    #[test]
    fn test_group_explicit_deny_short_circuits() {
        let entries = vec![
            entry(R, A, "G.g1", AclValue::Deny),
            entry(R, FULL_CONTROL, "G.g2", AclValue::Grant),
        ];
        assert_eq!(check("U.alice", &["G.g1", "G.g2"], &entries), Verdict::Denied);
        assert_eq!(check("U.alice", &["G.g2", "G.g1"], &entries), Verdict::Denied);
    }

    #[test]
    fn test_group_explicit_deny_beats_other_group_explicit_grant() {
        let entries = vec![
            entry(R, A, "G.g1", AclValue::Grant),
            entry(R, A, "G.g2", AclValue::Deny),
        ];
        assert_eq!(check("U.alice", &["G.g1", "G.g2"], &entries), Verdict::Denied);
    }

    #[test]
    fn test_group_explicit_grant_beats_full_control_deny() {
        let entries = vec![
            entry(R, A, "G.g1", AclValue::Grant),
            entry(R, FULL_CONTROL, "G.g2", AclValue::Deny),
        ];
        assert_eq!(check("U.alice", &["G.g1", "G.g2"], &entries), Verdict::Granted);

        // Same group: explicit grant still beats its own full-control deny.
        let entries = vec![
            entry(R, FULL_CONTROL, "G.g1", AclValue::Deny),
            entry(R, A, "G.g1", AclValue::Grant),
        ];
        assert_eq!(check("U.alice", &["G.g1"], &entries), Verdict::Granted);
    }

    #[test]
    fn test_full_control_consensus() {
        let grant = vec![entry(R, FULL_CONTROL, "G.g1", AclValue::Grant)];
        assert_eq!(check("U.alice", &["G.g1"], &grant), Verdict::Granted);

        let deny = vec![entry(R, FULL_CONTROL, "G.g1", AclValue::Deny)];
        assert_eq!(check("U.alice", &["G.g1"], &deny), Verdict::Denied);
    }

    #[test]
    fn test_full_control_conflict_deny_wins() {
        let entries = vec![
            entry(R, FULL_CONTROL, "G.g1", AclValue::Grant),
            entry(R, FULL_CONTROL, "G.g2", AclValue::Deny),
        ];
        assert_eq!(check("U.alice", &["G.g1", "G.g2"], &entries), Verdict::Denied);
    }

    #[test]
    fn test_groups_user_is_not_in_are_ignored() {
        let entries = vec![entry(R, FULL_CONTROL, "G.g2", AclValue::Deny)];
        assert_eq!(check("U.alice", &["G.g1"], &entries), Verdict::Unknown);
    }

    #[test]
    fn test_verdict_from_value() {
        assert_eq!(Verdict::from(AclValue::Grant), Verdict::Granted);
        assert_eq!(Verdict::from(AclValue::Deny), Verdict::Denied);
        assert!(Verdict::Granted.is_granted());
        assert!(!Verdict::Unknown.is_granted());
        assert_eq!(Verdict::Denied.to_string(), "denied");
    }
}
