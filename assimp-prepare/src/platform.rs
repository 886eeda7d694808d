//! Target platform identification and per-platform naming conventions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PrepareError;

/// Target platforms the staging workflow knows how to populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    Windows,
    MacOs,
    Linux,
    Android,
    Ios,
}

impl TargetPlatform {
    /// Detect the platform of the host this process is running on.
    ///
    /// Returns `None` on hosts the staging workflow does not know about; the
    /// caller is expected to ask for an explicit platform instead.
    pub fn current() -> Option<Self> {
        match std::env::consts::OS {
            "windows" => Some(Self::Windows),
            "macos" => Some(Self::MacOs),
            "linux" => Some(Self::Linux),
            "android" => Some(Self::Android),
            "ios" => Some(Self::Ios),
            _ => None,
        }
    }

    /// Returns the lowercase string identifier for this platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }

    /// Name of the per-platform subdirectory under the binary staging root.
    ///
    /// These are the fixed directory names the host packaging step looks in.
    pub fn binary_dir_name(&self) -> &'static str {
        match self {
            Self::Windows => "Win64",
            Self::MacOs => "Mac",
            Self::Linux => "Linux",
            Self::Android => "Android",
            Self::Ios => "IOS",
        }
    }

    /// File name of the runtime shared library staged for this platform, if
    /// the platform has a staging copy step at all.
    pub fn shared_library(&self) -> Option<&'static str> {
        match self {
            Self::Windows => Some("assimp.dll"),
            Self::MacOs => Some("libassimp.dylib"),
            Self::Linux => Some("libassimp.so"),
            Self::Android | Self::Ios => None,
        }
    }

    /// File name of the versioned shared library declared as a runtime
    /// dependency alongside the unversioned one.
    pub fn versioned_library(&self) -> Option<&'static str> {
        match self {
            Self::MacOs => Some("libassimp.5.dylib"),
            Self::Linux => Some("libassimp.so.5"),
            Self::Windows | Self::Android | Self::Ios => None,
        }
    }

    /// Glob over the vendored `bin/` directory selecting the entries whose
    /// symlinks must be replaced with real copies before packaging.
    pub fn symlink_pattern(&self) -> Option<&'static str> {
        match self {
            Self::MacOs => Some("libassimp*.dylib"),
            Self::Linux => Some("libassimp*.so.5*"),
            Self::Windows | Self::Android | Self::Ios => None,
        }
    }

    /// Whether the workflow configures and builds the vendored source tree
    /// for this platform.
    ///
    /// Desktop platforms build from source. Android consumes a prebuilt
    /// architecture-specific artifact, and iOS has no build or stage actions.
    pub fn builds_from_source(&self) -> bool {
        matches!(self, Self::Windows | Self::MacOs | Self::Linux)
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TargetPlatform {
    type Err = PrepareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both the lowercase identifiers and the engine-style staging
        // directory names.
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win64" => Ok(Self::Windows),
            "macos" | "mac" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            _ => Err(PrepareError::UnknownPlatform(s.to_string())),
        }
    }
}
