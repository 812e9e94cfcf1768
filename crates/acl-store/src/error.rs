//! Error types for ACL persistence
//!
//! Store operations only fail validation and report [`AclError`] directly.
//! [`StoreError`] covers what storers and configuration can run into.

use acl_core::AclError;
use thiserror::Error;

/// Persistence and configuration error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Invalid entry data (empty field, unknown value)
    #[error(transparent)]
    Acl(#[from] AclError),

    /// Backing medium I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persisted document has a format version this build cannot read
    #[error("Unsupported document version: {0}")]
    UnsupportedVersion(u32),

    /// Invalid configuration value
    #[error("Invalid configuration value for {key}: {message}")]
    Config {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Check if this error comes from the backing medium rather than the data.
    pub fn is_io(&self) -> bool {
        matches!(self, StoreError::Io(_))
    }
}
