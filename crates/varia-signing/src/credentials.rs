//! Signing credential types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const REDACTED: &str = "********";

/// A secret string that never shows up in logs or debug output.
///
/// Serialization emits the real value, since the signing stage consumes it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Wrap a secret value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the underlying value
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// A placeholder with the same shape, for printable copies
    pub fn redacted() -> Self {
        Self(REDACTED.to_string())
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(REDACTED)
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(REDACTED)
    }
}

/// Signing identity for a release artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSet {
    /// Key alias inside the keystore
    pub key_alias: String,

    /// Password for the key
    pub key_password: Secret,

    /// Keystore location. `None` means the signing backend's default keystore.
    pub store_file: Option<PathBuf>,

    /// Password for the keystore
    pub store_password: Secret,
}

impl CredentialSet {
    /// Create a new credential set
    pub fn new(
        key_alias: impl Into<String>,
        key_password: impl Into<String>,
        store_file: Option<PathBuf>,
        store_password: impl Into<String>,
    ) -> Self {
        Self {
            key_alias: key_alias.into(),
            key_password: Secret::new(key_password),
            store_file,
            store_password: Secret::new(store_password),
        }
    }

    /// Keystore path, if one was configured
    pub fn store_file(&self) -> Option<&Path> {
        self.store_file.as_deref()
    }

    /// Whether the default keystore of the signing backend should be used
    pub fn uses_default_keystore(&self) -> bool {
        self.store_file.is_none()
    }

    /// A copy with both passwords replaced by a placeholder
    pub fn redacted(&self) -> Self {
        Self {
            key_alias: self.key_alias.clone(),
            key_password: Secret::redacted(),
            store_file: self.store_file.clone(),
            store_password: Secret::redacted(),
        }
    }
}
