//! Error handling for the build-and-stage workflow.
//!
//! Tool resolution, configure/build failures, and a missing vendored source
//! tree abort the workflow; cosmetic staging issues are reported as
//! [`StageWarning`](crate::prepare::StageWarning)s instead and never abort.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Result type alias for workflow operations.
pub type Result<T> = std::result::Result<T, PrepareError>;

/// Fatal failures of the build-and-stage workflow.
#[derive(Error, Debug)]
pub enum PrepareError {
    /// The vendored Assimp source tree is absent or incomplete.
    #[error(
        "Assimp source not found at {path}.\n\
         Hint: git submodule update --init --recursive, or point --module-dir at the \
         directory containing the vendored `assimp/` tree"
    )]
    MissingSource { path: PathBuf },

    /// The build tool executable could not be started.
    #[error(
        "failed to launch build tool `{tool}`: {source}\n\
         Hint: install CMake, or set CMAKE_EXE_PATH to the executable"
    )]
    ToolLaunch {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configure step exited with a non-zero status.
    #[error("configure step failed with {status}\n{stderr_tail}")]
    ConfigureFailed {
        status: ExitStatus,
        stderr_tail: String,
    },

    /// The build step exited with a non-zero status.
    #[error("build step failed with {status}\n{stderr_tail}")]
    BuildFailed {
        status: ExitStatus,
        stderr_tail: String,
    },

    /// Platform name outside the supported set.
    #[error("unknown target platform `{0}` (expected windows, macos, linux, android, or ios)")]
    UnknownPlatform(String),

    /// The staging environment itself is unusable (e.g. the output directory
    /// cannot be created).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
