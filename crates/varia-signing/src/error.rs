//! Error types for credential loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for credential operations
pub type Result<T> = std::result::Result<T, CredentialError>;

/// Credential-related errors
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The credential file exists but is not a key/value file
    #[error("Malformed credential file {path} at line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The credential file is missing required keys
    #[error("Incomplete credentials in {path}: missing {}", .missing.join(", "))]
    Incomplete {
        path: PathBuf,
        missing: Vec<&'static str>,
    },

    /// IO error
    #[error("IO error reading credentials: {0}")]
    Io(#[from] std::io::Error),
}
