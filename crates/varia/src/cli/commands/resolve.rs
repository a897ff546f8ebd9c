//! Resolve command

use std::path::PathBuf;

use clap::Args;
use tracing::info;
use varia_core::BuildType;
use varia_variants::{resolve_project, BuildVariantSpec};

use crate::cli::output::{self, header, key_value, list, path_style, version_style};
use crate::cli::{Cli, OutputFormat, Project};

/// Resolve the build variant for a build type
#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Build type to resolve (debug or release)
    pub build_type: BuildType,

    /// Include signing passwords in the output
    #[arg(long)]
    pub include_secrets: bool,

    /// Write the spec as JSON to a file instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ResolveCommand {
    /// Execute the resolve command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            build_type = %self.build_type,
            include_secrets = self.include_secrets,
            "executing resolve command"
        );
        let cwd = std::env::current_dir()?;
        let project = Project::discover(&cwd)?;

        let spec = resolve_project(&project.root, &project.config, self.build_type)?;

        let printable = if self.include_secrets {
            spec
        } else {
            spec.redacted()
        };

        if let Some(ref path) = self.output {
            std::fs::write(path, serde_json::to_string_pretty(&printable)?)?;
            if !cli.quiet {
                output::success(&format!(
                    "Wrote {} spec to {}",
                    self.build_type,
                    path_style().apply_to(path.display())
                ));
            }
            return Ok(());
        }

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&printable)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    print_spec(&printable);
                }
            }
        }

        Ok(())
    }
}

fn print_spec(spec: &BuildVariantSpec) {
    let identity = &spec.identity;
    println!(
        "{}",
        header(&format!("{} variant of {}", spec.build_type, identity.application_id))
    );
    println!(
        "{}",
        key_value(
            "version",
            &format!(
                "{} ({})",
                version_style().apply_to(&identity.version_name),
                identity.version_code
            )
        )
    );
    println!("{}", key_value("namespace", &identity.namespace));
    println!(
        "{}",
        key_value(
            "platform",
            &format!(
                "min {} / target {} / compile {}",
                identity.platform.min, identity.platform.target, identity.platform.compile
            )
        )
    );
    println!("{}", key_value("architectures", &list(&spec.architecture_filter)));
    println!("{}", key_value("locales", &list(&spec.locale_filter)));
    println!("{}", key_value("splits", &list(&spec.split_dimensions)));

    println!();
    println!("{}", header("Signing"));
    match spec.signing {
        Some(ref creds) => {
            println!("{}", key_value("alias", &creds.key_alias));
            let keystore = creds
                .store_file()
                .map(|p| path_style().apply_to(p.display()).to_string())
                .unwrap_or_else(|| "default keystore".to_string());
            println!("{}", key_value("keystore", &keystore));
            println!("{}", key_value("key password", creds.key_password.expose()));
            println!("{}", key_value("store password", creds.store_password.expose()));
        }
        None => println!("{}", key_value("identity", "implicit debug identity")),
    }

    println!();
    println!("{}", header("Shrink"));
    let shrink = &spec.shrink;
    println!("{}", key_value("minify code", &shrink.minify_code.to_string()));
    println!(
        "{}",
        key_value("shrink resources", &shrink.shrink_resources.to_string())
    );
    println!("{}", key_value("rule files", &list(&shrink.proguard_files)));
    println!("{}", key_value("excludes", &list(&shrink.resource_excludes)));
    println!(
        "{}",
        key_value("native symbols", shrink.native_debug_symbols.as_str())
    );
}
