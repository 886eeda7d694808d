//! Workflow configuration.
//!
//! All ambient-environment access happens in [`PrepareConfig::from_env`],
//! which is meant to be called once at the process entry point. Core workflow
//! code only ever sees the resolved configuration value.

use std::{env, path::PathBuf};

use crate::platform::TargetPlatform;

/// Environment variable overriding the build-tool executable location.
pub const CMAKE_EXE_PATH: &str = "CMAKE_EXE_PATH";

/// Resolved configuration for one build-and-stage invocation.
#[derive(Clone, Debug)]
pub struct PrepareConfig {
    /// Platform whose naming conventions and staging layout apply.
    pub platform: TargetPlatform,
    /// Directory containing the vendored `assimp/` source tree.
    pub module_dir: PathBuf,
    /// Root of the per-platform binary staging directories.
    pub staging_root: PathBuf,
    /// Build tool executable. Not validated here; a bad path surfaces as a
    /// launch error when the tool is first invoked.
    pub build_tool: PathBuf,
    /// CMake build type passed to the configure step.
    pub build_type: String,
    /// Android ABI selecting the prebuilt architecture-specific artifact.
    pub android_abi: String,
    /// Emit per-registration detail while preparing.
    pub verbose: bool,
}

impl PrepareConfig {
    /// Create a configuration with the default tool path and staging layout.
    pub fn new(platform: TargetPlatform, module_dir: impl Into<PathBuf>) -> Self {
        let module_dir = module_dir.into();
        // The staging root sits three levels above the module, next to the
        // plugin's Source/ tree.
        let staging_root = module_dir.join("../../../Binaries");
        Self {
            platform,
            module_dir,
            staging_root,
            build_tool: Self::default_build_tool(),
            build_type: "Release".to_string(),
            android_abi: "arm64-v8a".to_string(),
            verbose: false,
        }
    }

    /// Create a configuration honoring the `CMAKE_EXE_PATH` override.
    ///
    /// Entry-point only: this is the single place the workflow reads the
    /// process environment.
    pub fn from_env(platform: TargetPlatform, module_dir: impl Into<PathBuf>) -> Self {
        let mut cfg = Self::new(platform, module_dir);
        if let Ok(tool) = env::var(CMAKE_EXE_PATH) {
            if !tool.trim().is_empty() {
                cfg.build_tool = PathBuf::from(tool);
            }
        }
        cfg.verbose = env::var("ASSIMP_PREPARE_VERBOSE").is_ok();
        cfg
    }

    /// The hard-coded per-host-OS fallback location of the build tool.
    pub fn default_build_tool() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from(r"C:\Program Files\CMake\bin\cmake.exe")
        } else {
            PathBuf::from("/usr/bin/cmake")
        }
    }

    /// Root of the vendored Assimp checkout.
    pub fn assimp_source_dir(&self) -> PathBuf {
        self.module_dir.join("assimp")
    }

    /// The staging directory the host packaging step expects runtime binaries
    /// in for the configured platform. Pure; nothing is created.
    pub fn binary_output_dir(&self) -> PathBuf {
        self.staging_root.join(self.platform.binary_dir_name())
    }
}
