//! Error types for ACL operations
//!
//! Validation failures are exceptional and surface as [`AclError`].
//! Absence of data is not an error: a missing entry is reported as `false`
//! by the store and as [`Verdict::Unknown`](crate::Verdict::Unknown) by the
//! evaluator.

use thiserror::Error;

/// ACL error types.
///
/// All variants are caller-visible immediately; nothing is retried or
/// recovered internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AclError {
    /// A required argument was empty.
    ///
    /// Carries the name of the offending parameter (`resource`, `action`,
    /// `subject`, `user`, ...).
    #[error("Invalid argument: {0} cannot be empty")]
    InvalidArgument(&'static str),

    /// An entry value is neither grant nor deny.
    #[error("Unsupported ACL value: {0}")]
    UnsupportedValue(String),

    /// The requested action may not be queried.
    ///
    /// Full control only exists as a stored rule; asking whether a subject
    /// has full control is API misuse.
    #[error("Disallowed action: {0}")]
    Disallowed(String),
}

/// Result type for ACL operations.
pub type AclResult<T> = Result<T, AclError>;

impl AclError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AclError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AclError::UnsupportedValue(_) => "UNSUPPORTED_VALUE",
            AclError::Disallowed(_) => "DISALLOWED",
        }
    }
}

/// Reject an empty string argument.
///
/// # Arguments
///
/// * `name` - Parameter name reported in the error
/// * `value` - The value to check
///
/// # Returns
///
/// `Ok(())` if `value` is non-empty, [`AclError::InvalidArgument`] otherwise
pub fn require_non_empty(name: &'static str, value: &str) -> AclResult<()> {
    if value.is_empty() {
        return Err(AclError::InvalidArgument(name));
    }
    Ok(())
}
