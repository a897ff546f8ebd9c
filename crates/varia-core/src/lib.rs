//! Varia Core - Shared types and configuration for build variant resolution
//!
//! This crate provides the build-type and packaging-dimension types, the
//! configuration error taxonomy, and loading/validation of the static project
//! declarations (`varia.toml` / `varia.yaml`) that every resolution starts from.

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    find_config, load_config, load_config_from_dir, ApplicationConfig, PackagingConfig,
    PlatformConfig, ProjectConfig, SigningConfig, ToolchainConfig,
};
pub use error::{ConfigError, Result};
pub use types::{Abi, BuildType, NativeDebugSymbols, SplitDimension};
