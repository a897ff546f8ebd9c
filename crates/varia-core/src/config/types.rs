//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::Abi;

use super::defaults;

/// Static project declarations consumed by variant resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Application identity and version
    pub application: ApplicationConfig,

    /// Platform API level bounds
    pub platform: PlatformConfig,

    /// Toolchain settings forwarded to the compiler stage
    pub toolchain: ToolchainConfig,

    /// Packaging allow-lists and shrink additions
    pub packaging: PackagingConfig,

    /// Signing credential source
    pub signing: SigningConfig,
}

/// Application identity and version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Stable application identifier (e.g., "com.example.app")
    pub id: String,

    /// Code namespace, defaults to the application id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Monotonic integer version
    pub version_code: u32,

    /// User-facing version string
    pub version_name: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            namespace: None,
            version_code: 1,
            version_name: "1.0.0".to_string(),
        }
    }
}

impl ApplicationConfig {
    /// The namespace, falling back to the application id
    pub fn effective_namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(&self.id)
    }
}

/// Platform API level bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Minimum supported platform version
    pub min: u32,

    /// Platform version the app is tested against
    pub target: u32,

    /// Platform version the app is compiled against
    pub compile: u32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            min: defaults::DEFAULT_MIN_PLATFORM,
            target: defaults::DEFAULT_TARGET_PLATFORM,
            compile: defaults::DEFAULT_COMPILE_PLATFORM,
        }
    }
}

/// Toolchain settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Native development kit version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ndk_version: Option<String>,

    /// JVM bytecode target
    pub jvm_target: u32,

    /// Whether vector drawables use the support library
    pub vector_drawables_support: bool,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            ndk_version: None,
            jvm_target: defaults::DEFAULT_JVM_TARGET,
            vector_drawables_support: false,
        }
    }
}

/// Packaging allow-lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingConfig {
    /// Architectures to include, narrowed from the full ABI universe
    pub architectures: Vec<Abi>,

    /// Locales whose resources are retained
    pub locales: Vec<String>,

    /// Exclusion globs applied on top of the fixed release excludes
    pub extra_excludes: Vec<String>,

    /// Project shrinker rule files
    pub proguard_files: Vec<String>,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            architectures: defaults::DEFAULT_ARCHITECTURES.to_vec(),
            locales: defaults::DEFAULT_LOCALES
                .iter()
                .map(|l| l.to_string())
                .collect(),
            extra_excludes: Vec::new(),
            proguard_files: vec![defaults::DEFAULT_PROGUARD_RULES.to_string()],
        }
    }
}

/// Signing credential source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningConfig {
    /// Credential property file, relative to the project root
    pub credentials_file: PathBuf,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            credentials_file: PathBuf::from(defaults::DEFAULT_CREDENTIALS_FILE),
        }
    }
}
