//! Exit codes for the CLI

use varia_core::ConfigError;
use varia_signing::CredentialError;
use varia_variants::ResolveError;

use crate::cli::commands::ValidationFailed;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Credential file missing, malformed or incomplete
pub const CREDENTIALS_ERROR: i32 = 3;

/// Variant resolution error
pub const RESOLUTION_ERROR: i32 = 4;

/// Validation error
pub const VALIDATION_ERROR: i32 = 5;

/// Map an error to the exit code an orchestrator can branch on
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<ResolveError>() {
        return match err {
            ResolveError::Config(_) => CONFIG_ERROR,
            ResolveError::Credentials(_) | ResolveError::MissingReleaseCredentials => {
                CREDENTIALS_ERROR
            }
            ResolveError::InvalidPlatformRange { .. }
            | ResolveError::EmptyArchitectureFilter
            | ResolveError::InvalidExcludePattern { .. } => RESOLUTION_ERROR,
        };
    }

    if err.downcast_ref::<ValidationFailed>().is_some() {
        return VALIDATION_ERROR;
    }

    if err.downcast_ref::<ConfigError>().is_some() {
        return CONFIG_ERROR;
    }

    if err.downcast_ref::<CredentialError>().is_some() {
        return CREDENTIALS_ERROR;
    }

    ERROR
}
