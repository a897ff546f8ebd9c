//! Init command

use std::path::PathBuf;

use clap::Args;
use tracing::info;
use varia_core::ConfigError;
use varia_core::config::{
    validate_application_id, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TEMPLATE_YAML,
    DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML,
};

use crate::cli::output;
use crate::cli::Cli;

/// Placeholder application id in the default templates
const TEMPLATE_APPLICATION_ID: &str = "com.example.app";

/// Write a default project configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Write YAML instead of TOML
    #[arg(long)]
    pub yaml: bool,

    /// Application id to put in the configuration
    #[arg(long)]
    pub application_id: Option<String>,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yaml = self.yaml, "executing init command");
        let cwd = std::env::current_dir()?;
        let default_name = if self.yaml {
            DEFAULT_CONFIG_YAML
        } else {
            DEFAULT_CONFIG_TOML
        };
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(default_name));

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        let content = self.render()?;
        std::fs::write(&config_path, content)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                output::path_style().apply_to(config_path.display())
            ));
        }

        Ok(())
    }

    fn render(&self) -> Result<String, ConfigError> {
        let template = if self.yaml {
            DEFAULT_CONFIG_TEMPLATE_YAML
        } else {
            DEFAULT_CONFIG_TEMPLATE
        };

        match self.application_id {
            Some(ref id) => {
                validate_application_id(id)?;
                Ok(template.replace(TEMPLATE_APPLICATION_ID, id))
            }
            None => Ok(template.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(yaml: bool, application_id: Option<&str>) -> InitCommand {
        InitCommand {
            force: false,
            yaml,
            application_id: application_id.map(str::to_string),
            output: None,
        }
    }

    #[test]
    fn test_render_substitutes_application_id() {
        let toml = command(false, Some("com.cngz.arya")).render().unwrap();
        assert!(toml.contains("id = \"com.cngz.arya\""));
        assert!(!toml.contains(TEMPLATE_APPLICATION_ID));

        let yaml = command(true, Some("com.cngz.arya")).render().unwrap();
        assert!(yaml.contains("id: com.cngz.arya"));
    }

    #[test]
    fn test_rendered_config_loads() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_TOML);
        std::fs::write(&path, command(false, Some("com.cngz.arya")).render().unwrap()).unwrap();

        let config = varia_core::load_config(&path).unwrap();
        assert_eq!(config.application.id, "com.cngz.arya");
    }

    #[test]
    fn test_invalid_application_id_is_rejected() {
        for id in ["com.example\"app", "single", "com..arya", "com.cngz.arya\nx = 1"] {
            let err = command(false, Some(id)).render().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { .. }), "{id}");
        }
    }

    #[test]
    fn test_execute_writes_nothing_for_invalid_id() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_TOML);
        let mut cmd = command(false, Some("com.example\"app"));
        cmd.output = Some(path.clone());

        let cli = <Cli as clap::Parser>::try_parse_from(["varia", "--quiet", "init"]).unwrap();
        assert!(cmd.execute(&cli).is_err());
        assert!(!path.exists());
    }
}
