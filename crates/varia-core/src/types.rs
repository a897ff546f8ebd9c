//! Core types for Varia

use serde::{Deserialize, Serialize};

/// Build type selected for a single build invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    /// Local iteration build, signed with the implicit debug identity
    Debug,
    /// Distributable build, signed with project credentials
    Release,
}

impl BuildType {
    /// All build types, in resolution order
    pub const ALL: [BuildType; 2] = [BuildType::Debug, BuildType::Release];

    /// Returns the string representation of the build type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

impl std::fmt::Display for BuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BuildType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            _ => Err(format!("Unknown build type: {}", s)),
        }
    }
}

/// Axis along which the packager emits independent sub-bundles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDimension {
    /// One sub-bundle per CPU architecture
    Architecture,
    /// One sub-bundle per screen density bucket
    Density,
    /// One sub-bundle per language
    Language,
}

impl SplitDimension {
    /// All split dimensions
    pub const ALL: [SplitDimension; 3] = [
        SplitDimension::Architecture,
        SplitDimension::Density,
        SplitDimension::Language,
    ];

    /// Returns the string representation of the dimension
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Architecture => "architecture",
            Self::Density => "density",
            Self::Language => "language",
        }
    }
}

impl std::fmt::Display for SplitDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Target CPU architecture (native ABI) token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Abi {
    /// 64-bit ARM
    #[serde(rename = "arm64-v8a")]
    Arm64V8a,
    /// 32-bit ARM
    #[serde(rename = "armeabi-v7a")]
    ArmeabiV7a,
    /// 32-bit Intel
    #[serde(rename = "x86")]
    X86,
    /// 64-bit Intel
    #[serde(rename = "x86_64")]
    X86_64,
    /// 64-bit RISC-V
    #[serde(rename = "riscv64")]
    Riscv64,
}

impl Abi {
    /// The full architecture universe a project may narrow down from
    pub const ALL: [Abi; 5] = [
        Abi::Arm64V8a,
        Abi::ArmeabiV7a,
        Abi::X86,
        Abi::X86_64,
        Abi::Riscv64,
    ];

    /// Returns the ABI token as used by the native toolchain
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arm64V8a => "arm64-v8a",
            Self::ArmeabiV7a => "armeabi-v7a",
            Self::X86 => "x86",
            Self::X86_64 => "x86_64",
            Self::Riscv64 => "riscv64",
        }
    }
}

impl std::fmt::Display for Abi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Abi {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Abi::ALL
            .into_iter()
            .find(|abi| abi.as_str() == s)
            .ok_or_else(|| format!("Unknown ABI: {}", s))
    }
}

/// Level of native debug symbols bundled alongside the artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeDebugSymbols {
    /// No native symbols are kept
    #[default]
    None,
    /// Function names only
    SymbolTable,
    /// Full debug information
    Full,
}

impl NativeDebugSymbols {
    /// Returns the toolchain's spelling of the level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::SymbolTable => "SYMBOL_TABLE",
            Self::Full => "FULL",
        }
    }
}

impl std::fmt::Display for NativeDebugSymbols {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_type_from_str() {
        assert_eq!("debug".parse::<BuildType>().unwrap(), BuildType::Debug);
        assert_eq!("Release".parse::<BuildType>().unwrap(), BuildType::Release);
        assert!("profile".parse::<BuildType>().is_err());
    }

    #[test]
    fn test_abi_tokens() {
        for abi in Abi::ALL {
            assert_eq!(abi.as_str().parse::<Abi>().unwrap(), abi);
        }
        assert!("mips".parse::<Abi>().is_err());
    }

    #[test]
    fn test_abi_serde_uses_tokens() {
        let yaml = serde_yaml::to_string(&Abi::Arm64V8a).unwrap();
        assert_eq!(yaml.trim(), "arm64-v8a");
    }
}
