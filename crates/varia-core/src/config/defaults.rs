//! Default configuration values

use crate::types::Abi;

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "varia.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "varia.yaml";

/// Default credential property file, relative to the project root
pub const DEFAULT_CREDENTIALS_FILE: &str = "key.properties";

/// Default project shrinker rules file
pub const DEFAULT_PROGUARD_RULES: &str = "proguard-rules.pro";

pub const DEFAULT_MIN_PLATFORM: u32 = 21;
pub const DEFAULT_TARGET_PLATFORM: u32 = 35;
pub const DEFAULT_COMPILE_PLATFORM: u32 = 35;
pub const DEFAULT_JVM_TARGET: u32 = 17;

/// Architectures shipped unless the project narrows further
pub const DEFAULT_ARCHITECTURES: &[Abi] = &[Abi::Arm64V8a, Abi::ArmeabiV7a];

/// Locales retained unless the project declares otherwise
pub const DEFAULT_LOCALES: &[&str] = &["en", "tr"];

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".varia.toml",
        ".varia.yaml",
    ]
}

/// Default configuration template (TOML)
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Varia Configuration

[application]
id = "com.example.app"
version_code = 1
version_name = "1.0.0"

[platform]
min = 21
target = 35
compile = 35

[toolchain]
ndk_version = "27.0.12077973"
jvm_target = 17
vector_drawables_support = true

[packaging]
architectures = ["arm64-v8a", "armeabi-v7a"]
locales = ["en", "tr"]
extra_excludes = []
proguard_files = ["proguard-rules.pro"]

[signing]
credentials_file = "key.properties"
"#;

/// Default configuration template (YAML)
pub const DEFAULT_CONFIG_TEMPLATE_YAML: &str = r#"# Varia Configuration

application:
  id: com.example.app
  version_code: 1
  version_name: "1.0.0"

platform:
  min: 21
  target: 35
  compile: 35

toolchain:
  ndk_version: "27.0.12077973"
  jvm_target: 17
  vector_drawables_support: true

packaging:
  architectures: [arm64-v8a, armeabi-v7a]
  locales: [en, tr]
  extra_excludes: []
  proguard_files: [proguard-rules.pro]

signing:
  credentials_file: key.properties
"#;
