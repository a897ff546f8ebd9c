//! Signing command

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;
use tracing::info;
use varia_signing::CredentialStore;
use varia_variants::credential_store;

use crate::cli::output::{header, key_value, path_style};
use crate::cli::{Cli, OutputFormat, Project};

/// Signing credential commands
#[derive(Debug, Args)]
pub struct SigningCommand {
    #[command(subcommand)]
    pub command: SigningSubcommand,
}

/// Signing subcommands
#[derive(Debug, Subcommand)]
pub enum SigningSubcommand {
    /// Show whether release credentials are present and complete
    Status(StatusCommand),
}

/// Show credential status without revealing secrets
#[derive(Debug, Args)]
pub struct StatusCommand {}

/// Credential status as reported to the user
#[derive(Debug, Serialize)]
struct CredentialStatus {
    credentials_file: PathBuf,
    present: bool,
    key_alias: Option<String>,
    keystore: Option<PathBuf>,
    keystore_exists: Option<bool>,
    release_ready: bool,
}

impl SigningCommand {
    /// Execute the signing command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            SigningSubcommand::Status(cmd) => cmd.execute(cli),
        }
    }
}

impl StatusCommand {
    fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing signing status command");
        let cwd = std::env::current_dir()?;
        let project = Project::discover(&cwd)?;
        let store = credential_store(&project.root, &project.config);

        let status = credential_status(&store)?;

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&status)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    print_status(&status);
                }
            }
        }

        Ok(())
    }
}

fn credential_status(store: &CredentialStore) -> anyhow::Result<CredentialStatus> {
    let present = store.locate();
    let credentials = store.open()?;

    let keystore = credentials
        .as_ref()
        .and_then(|c| c.store_file().map(|p| p.to_path_buf()));
    let keystore_exists = keystore.as_ref().map(|p| p.exists());

    Ok(CredentialStatus {
        credentials_file: store.path().to_path_buf(),
        present,
        key_alias: credentials.as_ref().map(|c| c.key_alias.clone()),
        keystore,
        keystore_exists,
        release_ready: credentials.is_some(),
    })
}

fn print_status(status: &CredentialStatus) {
    println!("{}", header("Signing credentials"));
    println!(
        "{}",
        key_value(
            "file",
            &path_style()
                .apply_to(status.credentials_file.display())
                .to_string()
        )
    );

    if !status.present {
        println!("{}", key_value("status", "not present"));
        println!();
        println!(
            "{} Release builds will fail until credentials are provided",
            style("!").yellow().bold()
        );
        return;
    }

    if let Some(ref alias) = status.key_alias {
        println!("{}", key_value("alias", alias));
    }

    let keystore = match (&status.keystore, status.keystore_exists) {
        (Some(path), Some(true)) => path.display().to_string(),
        (Some(path), _) => format!("{} {}", path.display(), style("(missing)").red()),
        (None, _) => "default keystore".to_string(),
    };
    println!("{}", key_value("keystore", &keystore));
    println!("{}", key_value("passwords", "********"));

    println!();
    if status.release_ready {
        println!("{}", style("✓ Ready for release signing").green().bold());
    } else {
        println!(
            "{} Credential file has no entries; release builds will fail",
            style("!").yellow().bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_status_absent() {
        let temp = TempDir::new().unwrap();
        let store = CredentialStore::new(temp.path(), "key.properties");

        let status = credential_status(&store).unwrap();
        assert!(!status.present);
        assert!(!status.release_ready);
        assert!(status.key_alias.is_none());
    }

    #[test]
    fn test_status_complete_with_missing_keystore() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("key.properties"),
            "keyAlias=upload\nkeyPassword=hunter2-key\nstoreFile=upload.jks\nstorePassword=hunter2-store\n",
        )
        .unwrap();
        let store = CredentialStore::new(temp.path(), "key.properties");

        let status = credential_status(&store).unwrap();
        assert!(status.present);
        assert!(status.release_ready);
        assert_eq!(status.key_alias.as_deref(), Some("upload"));
        assert_eq!(status.keystore_exists, Some(false));

        let json = serde_json::to_string(&status).unwrap();
        assert!(!json.contains("hunter2"));
    }

    #[test]
    fn test_status_incomplete_is_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("key.properties"), "keyAlias=upload\n").unwrap();
        let store = CredentialStore::new(temp.path(), "key.properties");

        assert!(credential_status(&store).is_err());
    }
}
