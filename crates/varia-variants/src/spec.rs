//! Resolved build variant specification

use std::collections::BTreeSet;
use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use varia_core::{Abi, BuildType, NativeDebugSymbols, SplitDimension};
use varia_signing::CredentialSet;

use crate::error::{ResolveError, Result};

/// Platform API level bounds, ordered min <= target <= compile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformRange {
    pub min: u32,
    pub target: u32,
    pub compile: u32,
}

/// Static identity of the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIdentity {
    pub application_id: String,
    pub namespace: String,
    pub version_code: u32,
    pub version_name: String,
    pub platform: PlatformRange,
}

/// Toolchain settings forwarded to the compiler stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toolchain {
    pub ndk_version: Option<String>,
    pub jvm_target: u32,
    pub vector_drawables_support: bool,
}

/// Code and resource stripping applied before packaging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShrinkPolicy {
    pub minify_code: bool,
    pub shrink_resources: bool,
    /// Shrinker rule files, platform defaults first
    pub proguard_files: Vec<String>,
    /// Globs of packaged resources to drop
    pub resource_excludes: Vec<String>,
    pub native_debug_symbols: NativeDebugSymbols,
}

impl ShrinkPolicy {
    /// Whether any stripping happens at all
    pub fn is_enabled(&self) -> bool {
        self.minify_code || self.shrink_resources || !self.resource_excludes.is_empty()
    }

    /// Compile the exclusion globs
    pub fn matcher(&self) -> Result<ExclusionMatcher> {
        ExclusionMatcher::new(&self.resource_excludes)
    }
}

/// Compiled resource exclusion globs.
///
/// Patterns and paths are both taken relative to the package root, so
/// `/META-INF/AL2.0` and `META-INF/AL2.0` are the same entry.
#[derive(Debug, Clone)]
pub struct ExclusionMatcher {
    set: GlobSet,
}

impl ExclusionMatcher {
    /// Compile a list of glob patterns
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = GlobBuilder::new(pattern.trim_start_matches('/'))
                .literal_separator(true)
                .build()
                .map_err(|e| ResolveError::InvalidExcludePattern {
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                })?;
            builder.add(glob);
        }

        let set = builder
            .build()
            .map_err(|e| ResolveError::InvalidExcludePattern {
                pattern: patterns
                    .iter()
                    .map(|p| p.as_ref())
                    .collect::<Vec<_>>()
                    .join(", "),
                reason: e.to_string(),
            })?;
        Ok(Self { set })
    }

    /// Whether a packaged path is dropped
    pub fn is_excluded(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let relative = path.strip_prefix("/").unwrap_or(path);
        self.set.is_match(relative)
    }
}

/// Complete configuration for one build invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildVariantSpec {
    /// Version of the policy tables used
    pub policy_version: u32,

    pub build_type: BuildType,

    #[serde(flatten)]
    pub identity: ProjectIdentity,

    pub toolchain: Toolchain,

    /// Architectures to compile native code for
    pub architecture_filter: BTreeSet<Abi>,

    /// Locales whose resources are retained
    pub locale_filter: BTreeSet<String>,

    /// Signing credentials. Present exactly for release builds.
    pub signing: Option<CredentialSet>,

    pub shrink: ShrinkPolicy,

    /// Dimensions packaged as independent sub-bundles
    pub split_dimensions: BTreeSet<SplitDimension>,
}

impl BuildVariantSpec {
    /// A copy safe to print or log, with signing passwords masked
    pub fn redacted(&self) -> Self {
        Self {
            signing: self.signing.as_ref().map(CredentialSet::redacted),
            ..self.clone()
        }
    }

    /// Whether the packager emits a single artifact
    pub fn is_monolithic(&self) -> bool {
        self.split_dimensions.is_empty()
    }
}
