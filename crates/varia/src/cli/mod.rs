//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use varia_core::{load_config_from_dir, ProjectConfig};

use commands::{InitCommand, ResolveCommand, SigningCommand, ValidateCommand};

/// Varia - Release-build variant and signing configuration resolver
#[derive(Debug, Parser)]
#[command(name = "varia")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a default project configuration
    Init(InitCommand),

    /// Resolve the build variant for a build type
    Resolve(ResolveCommand),

    /// Validate configuration and credentials for every build type
    Validate(ValidateCommand),

    /// Inspect signing credentials
    Signing(SigningCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Resolve(ref cmd) => cmd.execute(&self),
            Commands::Validate(ref cmd) => cmd.execute(&self),
            Commands::Signing(ref cmd) => cmd.execute(&self),
        }
    }
}

/// A loaded project: its configuration and the directory it lives in
#[derive(Debug)]
pub struct Project {
    pub config: ProjectConfig,
    pub config_path: PathBuf,
    pub root: PathBuf,
}

impl Project {
    /// Find and load the project configuration at or above `dir`
    pub fn discover(dir: &Path) -> Result<Self, varia_core::ConfigError> {
        let (config, config_path) = load_config_from_dir(dir)?;
        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dir.to_path_buf());
        Ok(Self {
            config,
            config_path,
            root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve_release() {
        let cli = Cli::try_parse_from(["varia", "--format", "json", "resolve", "release"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Resolve(cmd) => {
                assert_eq!(cmd.build_type, varia_core::BuildType::Release);
                assert!(!cmd.include_secrets);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_build_type() {
        assert!(Cli::try_parse_from(["varia", "resolve", "profile"]).is_err());
    }

    #[test]
    fn test_project_discover_sets_root() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("varia.toml"),
            "[application]\nid = \"com.cngz.arya\"\n",
        )
        .unwrap();
        let nested = temp.path().join("lib");
        std::fs::create_dir_all(&nested).unwrap();

        let project = Project::discover(&nested).unwrap();
        assert_eq!(project.root, temp.path());
        assert_eq!(project.config.application.id, "com.cngz.arya");
    }
}
