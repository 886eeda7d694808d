//! Build-and-stage workflow for the vendored Assimp native library.
//!
//! Given a target platform, this crate resolves the external build tool,
//! configures and builds the bundled Assimp source tree, stages the produced
//! shared library into the platform's binary staging directory (converting
//! symlinks to real copies where the downstream packager needs them), and
//! returns the include/link/delay-load/runtime-dependency registrations the
//! host build description must apply.
//!
//! The workflow is an explicit lifecycle phase, [`prepare_dependency`],
//! invoked by the host orchestrator with its result checked, rather than a
//! construction side effect. Configuration is an explicit value; ambient
//! environment access happens only at the process entry point
//! ([`PrepareConfig::from_env`](config::PrepareConfig::from_env)).

pub mod config;
pub mod error;
pub mod platform;
pub mod prepare;
pub mod registration;
pub mod stage;
pub mod toolchain;

pub use config::PrepareConfig;
pub use error::{PrepareError, Result};
pub use platform::TargetPlatform;
pub use prepare::{PreparedDependency, StageWarning, prepare_dependency};
pub use registration::ModuleRegistration;
pub use toolchain::{BuildTool, ToolInvocation};
