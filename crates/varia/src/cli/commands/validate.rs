//! Validate command

use clap::Args;
use console::style;
use tracing::info;
use varia_core::BuildType;
use varia_variants::{resolve_project, ResolveError};

use crate::cli::{Cli, OutputFormat, Project};

/// Validation finished with errors
#[derive(Debug, thiserror::Error)]
#[error("Validation failed with {errors} error(s)")]
pub struct ValidationFailed {
    pub errors: usize,
}

/// Validate configuration and credentials for every build type
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(strict = self.strict, "executing validate command");
        let cwd = std::env::current_dir()?;

        let mut errors: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();

        let project = match Project::discover(&cwd) {
            Ok(project) => Some(project),
            Err(e) => {
                errors.push(format!("Configuration: {}", e));
                None
            }
        };

        if let Some(ref project) = project {
            check_project(project, &mut errors, &mut warnings);
        }

        // If strict, promote warnings to errors
        if self.strict {
            errors.append(&mut warnings);
        }

        let passed = errors.is_empty();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": passed,
                    "config_path": project
                        .as_ref()
                        .map(|p| p.config_path.to_string_lossy().to_string()),
                    "errors": errors,
                    "warnings": warnings
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", style("Validation Results").bold());
                    println!();

                    if let Some(ref project) = project {
                        println!("Config: {}", style(project.config_path.display()).cyan());
                        println!();
                    }

                    if !errors.is_empty() {
                        println!("{}", style("Errors:").red().bold());
                        for error in &errors {
                            println!("  {} {}", style("✗").red(), error);
                        }
                        println!();
                    }

                    if !warnings.is_empty() {
                        println!("{}", style("Warnings:").yellow().bold());
                        for warning in &warnings {
                            println!("  {} {}", style("!").yellow(), warning);
                        }
                        println!();
                    }

                    if passed {
                        if warnings.is_empty() {
                            println!("{}", style("✓ All checks passed").green().bold());
                        } else {
                            println!(
                                "{} with {} warning(s)",
                                style("✓ Validation passed").green().bold(),
                                warnings.len()
                            );
                        }
                    }
                }
            }
        }

        if !passed {
            return Err(ValidationFailed {
                errors: errors.len(),
            }
            .into());
        }

        Ok(())
    }
}

/// Resolve every build type through the same pipeline as `varia resolve`.
///
/// Credential failures do not depend on the build type, so they are reported
/// once and the remaining build types are not resolved.
fn check_project(project: &Project, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    let version_name = &project.config.application.version_name;
    if semver::Version::parse(version_name).is_err() {
        warnings.push(format!(
            "Version name '{}' is not a semantic version",
            version_name
        ));
    }

    for build_type in BuildType::ALL {
        match resolve_project(&project.root, &project.config, build_type) {
            Ok(spec) => {
                let keystore = spec.signing.as_ref().and_then(|creds| creds.store_file());
                if let Some(keystore) = keystore.filter(|k| !k.exists()) {
                    warnings.push(format!("Keystore not found at {}", keystore.display()));
                }
            }
            Err(ResolveError::Credentials(e)) => {
                errors.push(format!("Credentials: {}", e));
                break;
            }
            Err(e) => errors.push(format!("Resolve {}: {}", build_type, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(credentials: Option<&str>) -> (TempDir, Project) {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("varia.toml"),
            "[application]\nid = \"com.cngz.arya\"\n",
        )
        .unwrap();
        if let Some(content) = credentials {
            std::fs::write(temp.path().join("key.properties"), content).unwrap();
        }
        let project = Project::discover(temp.path()).unwrap();
        (temp, project)
    }

    fn check(project: &Project) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        check_project(project, &mut errors, &mut warnings);
        (errors, warnings)
    }

    #[test]
    fn test_credential_error_reported_once() {
        let (_temp, project) = project(Some("keyAlias=upload\n"));
        let (errors, _) = check(&project);

        assert_eq!(errors.len(), 1, "{errors:?}");
        assert!(errors[0].starts_with("Credentials:"));
    }

    #[test]
    fn test_absent_credentials_fail_release_only() {
        let (_temp, project) = project(None);
        let (errors, _) = check(&project);

        assert_eq!(errors.len(), 1, "{errors:?}");
        assert!(errors[0].starts_with("Resolve release:"));
    }

    #[test]
    fn test_missing_keystore_is_a_warning() {
        let (_temp, project) = project(Some(
            "keyAlias=upload\nkeyPassword=p1\nstoreFile=upload.jks\nstorePassword=p2\n",
        ));
        let (errors, warnings) = check(&project);

        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Keystore not found"));
    }
}
