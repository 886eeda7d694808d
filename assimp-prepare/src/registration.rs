//! Registrations handed to the host build description.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything the workflow registers with the host build description: include
/// paths, link libraries, delay-load directives, and runtime-dependency
/// declarations. This value is the component's only interface to its host.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ModuleRegistration {
    pub include_paths: Vec<PathBuf>,
    pub link_libraries: Vec<PathBuf>,
    /// Windows only: DLLs loaded on first use instead of at process start, so
    /// the consuming application controls the loader path.
    pub delay_load_dlls: Vec<PathBuf>,
    /// Shared libraries that must be staged along with the executable.
    pub runtime_dependencies: Vec<PathBuf>,
}

impl ModuleRegistration {
    pub fn add_include(&mut self, path: impl Into<PathBuf>) {
        self.include_paths.push(path.into());
    }

    pub fn add_link_library(&mut self, path: impl Into<PathBuf>) {
        self.link_libraries.push(path.into());
    }

    pub fn add_delay_load_dll(&mut self, path: impl Into<PathBuf>) {
        self.delay_load_dlls.push(path.into());
    }

    pub fn add_runtime_dependency(&mut self, path: impl Into<PathBuf>) {
        self.runtime_dependencies.push(path.into());
    }

    pub fn log_summary(&self) {
        for p in &self.include_paths {
            info!(path = %p.display(), "registered include path");
        }
        for p in &self.link_libraries {
            info!(path = %p.display(), "registered link library");
        }
        for p in &self.delay_load_dlls {
            info!(path = %p.display(), "registered delay-load DLL");
        }
        for p in &self.runtime_dependencies {
            info!(path = %p.display(), "registered runtime dependency");
        }
    }
}
