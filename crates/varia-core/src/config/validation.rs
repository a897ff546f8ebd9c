//! Configuration validation
//!
//! Checks field shapes only. The ordering of platform bounds is left to the
//! variant resolver so that it surfaces as a resolution error.

use std::collections::HashSet;
use std::sync::LazyLock;

use globset::Glob;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

use super::types::ProjectConfig;

/// Highest version code accepted by distribution stores
pub const MAX_VERSION_CODE: u32 = 2_100_000_000;

/// Dotted identifier with at least two segments
static APPLICATION_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$").expect("Invalid regex")
});

/// Locale qualifiers: `en`, `pt-BR`, `pt-rBR`, `b+sr+Latn`
static LOCALE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z]{2,3}(-r?[A-Z]{2})?|b\+[a-z]{2,3}(\+[A-Za-z0-9]{2,8})*)$")
        .expect("Invalid regex")
});

/// Validate configuration
pub fn validate_config(config: &ProjectConfig) -> Result<()> {
    debug!("validating configuration");
    validate_application(config)?;
    validate_platform(config)?;
    validate_toolchain(config)?;
    validate_packaging(config)?;
    validate_signing(config)?;
    debug!("configuration validation passed");
    Ok(())
}

/// Check that `id` is a dotted identifier usable as `application.id`
pub fn validate_application_id(id: &str) -> Result<()> {
    if !APPLICATION_ID_REGEX.is_match(id) {
        return Err(ConfigError::invalid(
            "application.id",
            format!("'{}' is not a dotted identifier like com.example.app", id),
        ));
    }
    Ok(())
}

fn validate_application(config: &ProjectConfig) -> Result<()> {
    let app = &config.application;

    if app.id.is_empty() {
        return Err(ConfigError::MissingField("application.id".to_string()));
    }

    validate_application_id(&app.id)?;

    if let Some(ref namespace) = app.namespace {
        if !APPLICATION_ID_REGEX.is_match(namespace) {
            return Err(ConfigError::invalid(
                "application.namespace",
                format!("'{}' is not a dotted identifier", namespace),
            ));
        }
    }

    if app.version_code == 0 || app.version_code > MAX_VERSION_CODE {
        return Err(ConfigError::invalid(
            "application.version_code",
            format!("must be between 1 and {}", MAX_VERSION_CODE),
        ));
    }

    if app.version_name.trim().is_empty() {
        return Err(ConfigError::invalid(
            "application.version_name",
            "version name cannot be empty",
        ));
    }

    if semver::Version::parse(&app.version_name).is_err() {
        warn!(version_name = %app.version_name, "version name is not a semantic version");
    }

    Ok(())
}

fn validate_platform(config: &ProjectConfig) -> Result<()> {
    let platform = &config.platform;
    for (field, value) in [
        ("platform.min", platform.min),
        ("platform.target", platform.target),
        ("platform.compile", platform.compile),
    ] {
        if value == 0 {
            return Err(ConfigError::invalid(field, "platform version must be positive"));
        }
    }
    Ok(())
}

fn validate_toolchain(config: &ProjectConfig) -> Result<()> {
    let toolchain = &config.toolchain;

    if toolchain.jvm_target < 8 {
        return Err(ConfigError::invalid(
            "toolchain.jvm_target",
            "JVM target must be 8 or newer",
        ));
    }

    if toolchain
        .ndk_version
        .as_deref()
        .is_some_and(|v| v.trim().is_empty())
    {
        return Err(ConfigError::invalid(
            "toolchain.ndk_version",
            "NDK version cannot be empty when set",
        ));
    }

    Ok(())
}

fn validate_packaging(config: &ProjectConfig) -> Result<()> {
    let packaging = &config.packaging;

    let mut seen = HashSet::new();
    for abi in &packaging.architectures {
        if !seen.insert(abi) {
            return Err(ConfigError::invalid(
                "packaging.architectures",
                format!("'{}' is listed more than once", abi),
            ));
        }
    }

    let mut seen = HashSet::new();
    for (i, locale) in packaging.locales.iter().enumerate() {
        if !LOCALE_REGEX.is_match(locale) {
            return Err(ConfigError::invalid(
                format!("packaging.locales[{}]", i),
                format!("'{}' is not a locale qualifier", locale),
            ));
        }
        if !seen.insert(locale) {
            return Err(ConfigError::invalid(
                format!("packaging.locales[{}]", i),
                format!("'{}' is listed more than once", locale),
            ));
        }
    }

    for (i, pattern) in packaging.extra_excludes.iter().enumerate() {
        if let Err(e) = Glob::new(pattern) {
            return Err(ConfigError::invalid(
                format!("packaging.extra_excludes[{}]", i),
                e.to_string(),
            ));
        }
    }

    for (i, file) in packaging.proguard_files.iter().enumerate() {
        if file.trim().is_empty() {
            return Err(ConfigError::invalid(
                format!("packaging.proguard_files[{}]", i),
                "rule file path cannot be empty",
            ));
        }
    }

    Ok(())
}

fn validate_signing(config: &ProjectConfig) -> Result<()> {
    if config.signing.credentials_file.as_os_str().is_empty() {
        return Err(ConfigError::invalid(
            "signing.credentials_file",
            "credentials file path cannot be empty",
        ));
    }
    Ok(())
}
