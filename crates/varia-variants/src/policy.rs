//! Build-type policy tables
//!
//! All debug/release branching is data in this module. The resolver reads the
//! table for the requested build type and never branches on it directly.
//! Bump [`POLICY_VERSION`] whenever a table entry changes.

use varia_core::{BuildType, NativeDebugSymbols, SplitDimension};

/// Version of the policy tables below
pub const POLICY_VERSION: u32 = 1;

/// Platform-provided optimizing shrinker configuration
pub const PLATFORM_PROGUARD_FILE: &str = "proguard-android-optimize.txt";

/// License metadata that collides between dependencies during packaging
pub const RELEASE_RESOURCE_EXCLUDES: &[&str] = &["/META-INF/{AL2.0,LGPL2.1}"];

/// How a build type obtains its signing identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningRequirement {
    /// Signed by the toolchain's implicit debug identity
    ImplicitDebugIdentity,
    /// Must be signed with the project's credentials
    ProjectCredentials,
}

/// Shrink settings for a build type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShrinkDefaults {
    pub minify_code: bool,
    pub shrink_resources: bool,
    /// Whether the fixed and project exclusion globs apply
    pub apply_excludes: bool,
    /// Whether the platform and project shrinker rule files apply
    pub apply_proguard_files: bool,
    pub native_debug_symbols: NativeDebugSymbols,
}

/// Policy row for one build type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildTypePolicy {
    pub build_type: BuildType,
    pub signing: SigningRequirement,
    pub shrink: ShrinkDefaults,
    pub splits: &'static [SplitDimension],
}

/// Debug builds: implicit signing, no shrinking, one monolithic artifact
pub const DEBUG_POLICY: BuildTypePolicy = BuildTypePolicy {
    build_type: BuildType::Debug,
    signing: SigningRequirement::ImplicitDebugIdentity,
    shrink: ShrinkDefaults {
        minify_code: false,
        shrink_resources: false,
        apply_excludes: false,
        apply_proguard_files: false,
        native_debug_symbols: NativeDebugSymbols::None,
    },
    splits: &[],
};

/// Release builds: project signing, full shrinking, split on every dimension
pub const RELEASE_POLICY: BuildTypePolicy = BuildTypePolicy {
    build_type: BuildType::Release,
    signing: SigningRequirement::ProjectCredentials,
    shrink: ShrinkDefaults {
        minify_code: true,
        shrink_resources: true,
        apply_excludes: true,
        apply_proguard_files: true,
        native_debug_symbols: NativeDebugSymbols::SymbolTable,
    },
    splits: &[
        SplitDimension::Architecture,
        SplitDimension::Density,
        SplitDimension::Language,
    ],
};

/// Look up the policy row for a build type
pub fn policy_for(build_type: BuildType) -> &'static BuildTypePolicy {
    match build_type {
        BuildType::Debug => &DEBUG_POLICY,
        BuildType::Release => &RELEASE_POLICY,
    }
}
