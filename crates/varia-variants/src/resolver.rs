//! Variant resolution
//!
//! Combines the static project declarations with the credentials found by the
//! credential store and the policy row for the requested build type.

use std::collections::BTreeSet;

use tracing::{debug, info};
use varia_core::{Abi, BuildType, ProjectConfig, SplitDimension};
use varia_signing::CredentialSet;

use crate::error::{ResolveError, Result};
use crate::policy::{
    policy_for, SigningRequirement, PLATFORM_PROGUARD_FILE, POLICY_VERSION,
    RELEASE_RESOURCE_EXCLUDES,
};
use crate::spec::{BuildVariantSpec, PlatformRange, ProjectIdentity, ShrinkPolicy, Toolchain};

/// Resolves a [`BuildVariantSpec`] for a build type.
///
/// Stateless: every call to [`VariantResolver::resolve`] is a pure function of
/// the project declarations, the credentials and the build type.
#[derive(Debug, Clone)]
pub struct VariantResolver<'a> {
    project: &'a ProjectConfig,
    credentials: Option<&'a CredentialSet>,
}

impl<'a> VariantResolver<'a> {
    /// Create a resolver over project declarations and optional credentials
    pub fn new(project: &'a ProjectConfig, credentials: Option<&'a CredentialSet>) -> Self {
        Self {
            project,
            credentials,
        }
    }

    /// Static identity, with the platform bounds checked for order
    pub fn resolve_identity(&self) -> Result<ProjectIdentity> {
        let app = &self.project.application;
        let platform = self.project.platform;

        if platform.min > platform.target || platform.target > platform.compile {
            return Err(ResolveError::InvalidPlatformRange {
                min: platform.min,
                target: platform.target,
                compile: platform.compile,
            });
        }

        Ok(ProjectIdentity {
            application_id: app.id.clone(),
            namespace: app.effective_namespace().to_string(),
            version_code: app.version_code,
            version_name: app.version_name.clone(),
            platform: PlatformRange {
                min: platform.min,
                target: platform.target,
                compile: platform.compile,
            },
        })
    }

    /// Toolchain settings, passed through
    pub fn resolve_toolchain(&self) -> Toolchain {
        let toolchain = &self.project.toolchain;
        Toolchain {
            ndk_version: toolchain.ndk_version.clone(),
            jvm_target: toolchain.jvm_target,
            vector_drawables_support: toolchain.vector_drawables_support,
        }
    }

    /// The declared architecture allow-list. The list is the same for every
    /// build type and must not be empty.
    pub fn resolve_architecture_filter(&self, build_type: BuildType) -> Result<BTreeSet<Abi>> {
        let filter: BTreeSet<Abi> = self.project.packaging.architectures.iter().copied().collect();
        if filter.is_empty() {
            return Err(ResolveError::EmptyArchitectureFilter);
        }
        debug!(%build_type, architectures = filter.len(), "architecture filter resolved");
        Ok(filter)
    }

    /// The declared locale allow-list
    pub fn resolve_locale_filter(&self) -> BTreeSet<String> {
        self.project.packaging.locales.iter().cloned().collect()
    }

    /// Signing binding for a build type.
    ///
    /// Debug builds use the toolchain's implicit identity and get `None`. Release
    /// builds require credentials.
    pub fn resolve_signing(
        build_type: BuildType,
        credentials: Option<&CredentialSet>,
    ) -> Result<Option<CredentialSet>> {
        match policy_for(build_type).signing {
            SigningRequirement::ImplicitDebugIdentity => Ok(None),
            SigningRequirement::ProjectCredentials => credentials
                .cloned()
                .map(Some)
                .ok_or(ResolveError::MissingReleaseCredentials),
        }
    }

    /// Shrink and resource-stripping policy for a build type
    pub fn resolve_shrink_policy(&self, build_type: BuildType) -> Result<ShrinkPolicy> {
        let defaults = policy_for(build_type).shrink;
        let packaging = &self.project.packaging;

        let proguard_files = if defaults.apply_proguard_files {
            std::iter::once(PLATFORM_PROGUARD_FILE.to_string())
                .chain(packaging.proguard_files.iter().cloned())
                .collect()
        } else {
            Vec::new()
        };

        let mut resource_excludes = Vec::new();
        if defaults.apply_excludes {
            for pattern in RELEASE_RESOURCE_EXCLUDES
                .iter()
                .map(|p| p.to_string())
                .chain(packaging.extra_excludes.iter().cloned())
            {
                if !resource_excludes.contains(&pattern) {
                    resource_excludes.push(pattern);
                }
            }
        }

        let policy = ShrinkPolicy {
            minify_code: defaults.minify_code,
            shrink_resources: defaults.shrink_resources,
            proguard_files,
            resource_excludes,
            native_debug_symbols: defaults.native_debug_symbols,
        };

        // Reject patterns now rather than in the packaging stage
        policy.matcher()?;
        Ok(policy)
    }

    /// Dimensions split into independent sub-bundles
    pub fn resolve_split_dimensions(build_type: BuildType) -> BTreeSet<SplitDimension> {
        policy_for(build_type).splits.iter().copied().collect()
    }

    /// Resolve the full specification, stopping at the first failure
    pub fn resolve(&self, build_type: BuildType) -> Result<BuildVariantSpec> {
        debug!(%build_type, "resolving build variant");

        let identity = self.resolve_identity()?;
        let toolchain = self.resolve_toolchain();
        let architecture_filter = self.resolve_architecture_filter(build_type)?;
        let locale_filter = self.resolve_locale_filter();
        let signing = Self::resolve_signing(build_type, self.credentials)?;
        let shrink = self.resolve_shrink_policy(build_type)?;
        let split_dimensions = Self::resolve_split_dimensions(build_type);

        info!(
            %build_type,
            application_id = %identity.application_id,
            version_code = identity.version_code,
            signed = signing.is_some(),
            shrink = shrink.is_enabled(),
            splits = split_dimensions.len(),
            "build variant resolved"
        );

        Ok(BuildVariantSpec {
            policy_version: POLICY_VERSION,
            build_type,
            identity,
            toolchain,
            architecture_filter,
            locale_filter,
            signing,
            shrink,
            split_dimensions,
        })
    }
}
