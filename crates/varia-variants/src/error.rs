//! Error types for variant resolution

use thiserror::Error;
use varia_core::ConfigError;
use varia_signing::CredentialError;

/// Result type alias for resolution
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Resolution errors. Every variant aborts the build.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Release build without usable signing credentials
    #[error("Release build requires signing credentials but none were found")]
    MissingReleaseCredentials,

    /// Platform bounds are not ordered min <= target <= compile
    #[error("Invalid platform range: min {min}, target {target}, compile {compile} (expected min <= target <= compile)")]
    InvalidPlatformRange { min: u32, target: u32, compile: u32 },

    /// No architectures left to build
    #[error("Architecture filter is empty; declare at least one architecture")]
    EmptyArchitectureFilter,

    /// A resource exclusion pattern does not compile
    #[error("Invalid resource exclusion pattern '{pattern}': {reason}")]
    InvalidExcludePattern { pattern: String, reason: String },

    /// Credential loading failed
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    /// Project configuration failed to load
    #[error(transparent)]
    Config(#[from] ConfigError),
}
