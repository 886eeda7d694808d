//! The build-and-stage workflow.
//!
//! [`prepare_dependency`] is the explicit lifecycle phase the host build
//! orchestrator invokes before its own build consumes the native library:
//! validate the vendored tree, configure and build it, then stage and
//! register the per-platform artifacts.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::PrepareConfig;
use crate::error::{PrepareError, Result};
use crate::platform::TargetPlatform;
use crate::registration::ModuleRegistration;
use crate::stage;
use crate::toolchain::BuildTool;

/// A recoverable staging issue. Reported and carried in the result; never an
/// abort, so a cosmetic staging problem cannot take down the enclosing
/// engine build.
#[derive(Clone, Debug)]
pub enum StageWarning {
    CopyFailed {
        source: PathBuf,
        dest: PathBuf,
        message: String,
    },
    SymlinkUnresolved {
        path: PathBuf,
    },
    SymlinkScanFailed {
        dir: PathBuf,
        message: String,
    },
}

impl fmt::Display for StageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CopyFailed {
                source,
                dest,
                message,
            } => write!(
                f,
                "failed to copy {} to {}: {}",
                source.display(),
                dest.display(),
                message
            ),
            Self::SymlinkUnresolved { path } => {
                write!(f, "could not resolve symlink {}", path.display())
            }
            Self::SymlinkScanFailed { dir, message } => {
                write!(f, "could not scan {} for symlinks: {}", dir.display(), message)
            }
        }
    }
}

/// Outcome of a successful [`prepare_dependency`] run.
#[derive(Debug, Default)]
pub struct PreparedDependency {
    /// What the host build description must register for this module.
    pub registration: ModuleRegistration,
    /// Runtime binaries placed into the staging directory.
    pub staged_files: Vec<PathBuf>,
    /// Recoverable issues encountered while staging.
    pub warnings: Vec<StageWarning>,
}

/// Build the vendored Assimp tree (where the platform policy says to) and
/// stage its artifacts for the configured platform.
///
/// Tool-launch, configure, and build failures abort with a typed error; a
/// failed native build must never silently produce stale artifacts. Copy and
/// symlink issues degrade to [`StageWarning`]s.
pub fn prepare_dependency(cfg: &PrepareConfig) -> Result<PreparedDependency> {
    let source_dir = cfg.assimp_source_dir();
    validate_source(&source_dir)?;

    if cfg.platform.builds_from_source() {
        let tool = BuildTool::new(cfg.build_tool.clone());
        tool.configure(&source_dir, &cfg.build_type)?;
        tool.build(&source_dir)?;
    }

    let mut prepared = PreparedDependency::default();
    prepared.registration.add_include(source_dir.join("include"));

    match cfg.platform {
        TargetPlatform::Windows => {
            prepared
                .registration
                .add_link_library(source_dir.join("lib").join("assimp.lib"));
            // Delay-load the DLL so it can be loaded from the staged location
            // rather than wherever the process happens to start.
            prepared
                .registration
                .add_delay_load_dll(source_dir.join("bin").join("assimp.dll"));
            stage_shared_library(cfg, &source_dir, &mut prepared)?;
        }
        TargetPlatform::MacOs => {
            prepared
                .registration
                .add_link_library(source_dir.join("bin").join("libassimp.dylib"));
            prepared
                .registration
                .add_runtime_dependency(source_dir.join("bin").join("libassimp.5.dylib"));
            materialize_bin_symlinks(cfg, &source_dir, &mut prepared);
            stage_shared_library(cfg, &source_dir, &mut prepared)?;
        }
        TargetPlatform::Linux => {
            prepared
                .registration
                .add_link_library(source_dir.join("bin").join("libassimp.so"));
            prepared
                .registration
                .add_runtime_dependency(source_dir.join("bin").join("libassimp.so.5"));
            materialize_bin_symlinks(cfg, &source_dir, &mut prepared);
            stage_shared_library(cfg, &source_dir, &mut prepared)?;
        }
        TargetPlatform::Android => {
            // Prebuilt architecture-specific artifact; nothing is built or
            // copied for Android.
            prepared.registration.add_link_library(
                source_dir
                    .join("lib")
                    .join("Android")
                    .join(&cfg.android_abi)
                    .join("libassimp.so"),
            );
        }
        TargetPlatform::Ios => {}
    }

    if cfg.verbose {
        prepared.registration.log_summary();
    }
    for warning in &prepared.warnings {
        warn!(%warning, "staging issue");
    }

    Ok(prepared)
}

fn validate_source(source_dir: &Path) -> Result<()> {
    if !source_dir.exists() || !source_dir.join("include").exists() {
        return Err(PrepareError::MissingSource {
            path: source_dir.to_path_buf(),
        });
    }
    Ok(())
}

fn stage_shared_library(
    cfg: &PrepareConfig,
    source_dir: &Path,
    prepared: &mut PreparedDependency,
) -> Result<()> {
    let Some(lib_name) = cfg.platform.shared_library() else {
        return Ok(());
    };

    let out_dir = cfg.binary_output_dir();
    stage::ensure_dir(&out_dir)?;

    let source = source_dir.join("bin").join(lib_name);
    let dest = out_dir.join(lib_name);
    match stage::copy_artifact(&source, &dest) {
        Ok(_) => {
            info!(dest = %dest.display(), "staged runtime library");
            prepared.staged_files.push(dest);
        }
        Err(e) => {
            prepared.warnings.push(StageWarning::CopyFailed {
                source,
                dest,
                message: e.to_string(),
            });
        }
    }
    Ok(())
}

fn materialize_bin_symlinks(
    cfg: &PrepareConfig,
    source_dir: &Path,
    prepared: &mut PreparedDependency,
) {
    let Some(pattern) = cfg.platform.symlink_pattern() else {
        return;
    };
    let bin_dir = source_dir.join("bin");
    match stage::materialize_symlinks(&bin_dir, pattern) {
        Ok(outcome) => {
            for path in outcome.unresolved {
                prepared.warnings.push(StageWarning::SymlinkUnresolved { path });
            }
        }
        Err(e) => {
            prepared.warnings.push(StageWarning::SymlinkScanFailed {
                dir: bin_dir,
                message: e.to_string(),
            });
        }
    }
}
