//! Varia Variants - Build variant resolution
//!
//! Produces one immutable [`BuildVariantSpec`] per build invocation from:
//! - the static project declarations ([`ProjectConfig`])
//! - the optional signing credentials ([`CredentialStore`])
//! - the requested [`BuildType`]
//!
//! Credentials are loaded first, independent of the build type. Any failure
//! aborts resolution before a spec exists.

pub mod error;
pub mod policy;
pub mod resolver;
pub mod spec;

use std::path::{Path, PathBuf};

use tracing::info;
use varia_core::{load_config_from_dir, BuildType, ProjectConfig};
use varia_signing::CredentialStore;

pub use error::{ResolveError, Result};
pub use policy::{policy_for, BuildTypePolicy, SigningRequirement, POLICY_VERSION};
pub use resolver::VariantResolver;
pub use spec::{
    BuildVariantSpec, ExclusionMatcher, PlatformRange, ProjectIdentity, ShrinkPolicy, Toolchain,
};

/// Credential store configured for a project
pub fn credential_store(project_root: &Path, config: &ProjectConfig) -> CredentialStore {
    CredentialStore::new(project_root, &config.signing.credentials_file)
}

/// Resolve a build variant for a project rooted at `project_root`
pub fn resolve_project(
    project_root: &Path,
    config: &ProjectConfig,
    build_type: BuildType,
) -> Result<BuildVariantSpec> {
    let credentials = credential_store(project_root, config).open()?;
    VariantResolver::new(config, credentials.as_ref()).resolve(build_type)
}

/// Find the project configuration at or above `dir` and resolve a variant.
///
/// Returns the spec and the configuration file it was resolved from.
pub fn resolve_from_dir(dir: &Path, build_type: BuildType) -> Result<(BuildVariantSpec, PathBuf)> {
    let (config, config_path) = load_config_from_dir(dir)?;
    let project_root = config_path.parent().unwrap_or(dir);
    info!(root = %project_root.display(), %build_type, "resolving project");

    let spec = resolve_project(project_root, &config, build_type)?;
    Ok((spec, config_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;
    use varia_core::SplitDimension;
    use varia_signing::CredentialError;

    const CONFIG: &str = r#"
[application]
id = "com.cngz.arya"
version_code = 3
version_name = "1.0.2"

[platform]
min = 24
target = 34
compile = 34
"#;

    fn project(credentials: Option<&str>) -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("varia.toml"), CONFIG).unwrap();
        if let Some(content) = credentials {
            std::fs::write(temp.path().join("key.properties"), content).unwrap();
        }
        temp
    }

    #[test]
    fn test_absent_credentials_debug_succeeds() {
        let temp = project(None);
        let (spec, _) = resolve_from_dir(temp.path(), BuildType::Debug).unwrap();
        assert!(spec.signing.is_none());
    }

    #[test]
    fn test_absent_credentials_release_fails() {
        let temp = project(None);
        let err = resolve_from_dir(temp.path(), BuildType::Release).unwrap_err();
        assert!(matches!(err, ResolveError::MissingReleaseCredentials));
    }

    #[test]
    fn test_complete_credentials_release_succeeds() {
        let temp = project(Some(
            "keyAlias=a\nkeyPassword=p1\nstoreFile=s.jks\nstorePassword=p2\n",
        ));
        let (spec, config_path) = resolve_from_dir(temp.path(), BuildType::Release).unwrap();

        assert_eq!(config_path, temp.path().join("varia.toml"));
        let signing = spec.signing.unwrap();
        assert_eq!(signing.key_alias, "a");
        assert_eq!(signing.key_password.expose(), "p1");
        assert_eq!(signing.store_file, Some(temp.path().join("s.jks")));
        assert_eq!(signing.store_password.expose(), "p2");
        assert_eq!(
            spec.split_dimensions,
            BTreeSet::from(SplitDimension::ALL)
        );
    }

    #[test]
    fn test_alias_only_credentials_release_fails() {
        let temp = project(Some("keyAlias=a\n"));
        let err = resolve_from_dir(temp.path(), BuildType::Release).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Credentials(CredentialError::Incomplete { .. })
        ));
    }

    #[test]
    fn test_incomplete_credentials_fail_debug_too() {
        let temp = project(Some("keyAlias=a\n"));
        assert!(resolve_from_dir(temp.path(), BuildType::Debug).is_err());
    }

    #[test]
    fn test_malformed_credentials_fail() {
        let temp = project(Some("keyAlias=a\nkeyPassword=\\u00zz\n"));
        let err = resolve_from_dir(temp.path(), BuildType::Release).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Credentials(CredentialError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn test_space_separated_credentials_release_succeeds() {
        let temp = project(Some("keyAlias upload\nkeyPassword p1\nstorePassword p2\n"));
        let (spec, _) = resolve_from_dir(temp.path(), BuildType::Release).unwrap();
        assert_eq!(spec.signing.unwrap().key_alias, "upload");
    }

    #[test]
    fn test_custom_credentials_file() {
        let temp = project(None);
        std::fs::write(
            temp.path().join("varia.toml"),
            format!("{CONFIG}\n[signing]\ncredentials_file = \"signing/upload.properties\"\n"),
        )
        .unwrap();
        std::fs::create_dir_all(temp.path().join("signing")).unwrap();
        std::fs::write(
            temp.path().join("signing/upload.properties"),
            "keyAlias=upload\nkeyPassword=p1\nstorePassword=p2\n",
        )
        .unwrap();

        let (spec, _) = resolve_from_dir(temp.path(), BuildType::Release).unwrap();
        let signing = spec.signing.unwrap();
        assert_eq!(signing.key_alias, "upload");
        assert!(signing.uses_default_keystore());
    }

    #[test]
    fn test_release_resolution_is_idempotent() {
        let temp = project(Some(
            "keyAlias=a\nkeyPassword=p1\nstoreFile=s.jks\nstorePassword=p2\n",
        ));
        let (first, _) = resolve_from_dir(temp.path(), BuildType::Release).unwrap();
        let (second, _) = resolve_from_dir(temp.path(), BuildType::Release).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_spec_serializes_flat_identity() {
        let temp = project(Some(
            "keyAlias=a\nkeyPassword=p1\nstoreFile=s.jks\nstorePassword=p2\n",
        ));
        let (spec, _) = resolve_from_dir(temp.path(), BuildType::Release).unwrap();

        let json = serde_json::to_value(spec.redacted()).unwrap();
        assert_eq!(json["application_id"], "com.cngz.arya");
        assert_eq!(json["build_type"], "release");
        assert_eq!(json["platform"]["compile"], 34);
        assert_eq!(json["signing"]["key_alias"], "a");
        assert_ne!(json["signing"]["key_password"], "p1");
        assert_eq!(
            json["split_dimensions"],
            serde_json::json!(["architecture", "density", "language"])
        );
    }
}
