//! Varia Signing - Signing credential loading for release builds
//!
//! This crate locates and parses the optional credential property file
//! (`key.properties`) and turns it into a typed [`CredentialSet`]:
//! - A missing file yields no credentials, which is not an error
//! - A malformed file fails with [`CredentialError::Malformed`]
//! - A file missing a required key fails with [`CredentialError::Incomplete`]
//!
//! Key material is passed through untouched; nothing here validates keystores.

pub mod credentials;
pub mod error;
pub mod properties;
pub mod store;

pub use credentials::{CredentialSet, Secret};
pub use error::{CredentialError, Result};
pub use properties::PropertyMap;
pub use store::CredentialStore;
