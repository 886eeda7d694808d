//! Build tool invocation.
//!
//! The vendored library is built by invoking the external build tool twice:
//! once to configure the tree, once to drive the actual build. Both
//! invocations run synchronously with fully buffered output, and both share
//! the vendored source root as their working directory.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::{PrepareError, Result};

/// One synchronous invocation of the external build tool. Constructed,
/// executed, and discarded; nothing is retained after the process exits.
#[derive(Clone, Debug)]
pub struct ToolInvocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

/// Which workflow step an invocation belongs to. Determines how a non-zero
/// exit status is classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Configure,
    Build,
}

/// Handle on a resolved build-tool executable.
///
/// The path is taken as-is; existence and executability are only checked by
/// the operating system when the process is spawned.
#[derive(Clone, Debug)]
pub struct BuildTool {
    exe: PathBuf,
}

impl BuildTool {
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into() }
    }

    pub fn executable(&self) -> &Path {
        &self.exe
    }

    /// The fixed configure argument set: Ninja generator, the requested build
    /// type, no library name suffix, plus the feature switches a from-source
    /// build of the vendored tree requires.
    pub fn configure_invocation(&self, source_dir: &Path, build_type: &str) -> ToolInvocation {
        ToolInvocation {
            program: self.exe.clone(),
            args: vec![
                "-G".to_string(),
                "Ninja".to_string(),
                format!("-DCMAKE_BUILD_TYPE={build_type}"),
                "-DBUILD_SHARED_LIBS=ON".to_string(),
                "-DASSIMP_BUILD_TESTS=OFF".to_string(),
                "-DASSIMP_BUILD_SAMPLES=OFF".to_string(),
                "-DASSIMP_BUILD_ASSIMP_TOOLS=OFF".to_string(),
                "-DASSIMP_WARNINGS_AS_ERRORS=OFF".to_string(),
                "-DLIBRARY_SUFFIX:STRING=".to_string(),
                "CMakeLists.txt".to_string(),
            ],
            working_dir: source_dir.to_path_buf(),
        }
    }

    /// Build the already-configured tree.
    pub fn build_invocation(&self, source_dir: &Path) -> ToolInvocation {
        ToolInvocation {
            program: self.exe.clone(),
            args: vec!["--build".to_string(), ".".to_string()],
            working_dir: source_dir.to_path_buf(),
        }
    }

    /// Run the configure step, blocking until the tool exits.
    pub fn configure(&self, source_dir: &Path, build_type: &str) -> Result<()> {
        info!(tool = %self.exe.display(), "configuring Assimp");
        run(&self.configure_invocation(source_dir, build_type), Step::Configure)
    }

    /// Run the build step, blocking until the tool exits.
    pub fn build(&self, source_dir: &Path) -> Result<()> {
        info!(tool = %self.exe.display(), "building Assimp");
        run(&self.build_invocation(source_dir), Step::Build)
    }
}

fn run(invocation: &ToolInvocation, step: Step) -> Result<()> {
    debug!(
        program = %invocation.program.display(),
        args = ?invocation.args,
        working_dir = %invocation.working_dir.display(),
        "spawning build tool"
    );

    let output = Command::new(&invocation.program)
        .args(&invocation.args)
        .current_dir(&invocation.working_dir)
        .output()
        .map_err(|source| PrepareError::ToolLaunch {
            tool: invocation.program.clone(),
            source,
        })?;

    // Output is fully buffered; report it only after the process has exited.
    if !output.stdout.is_empty() {
        debug!(stdout = %String::from_utf8_lossy(&output.stdout), "build tool stdout");
    }
    if !output.stderr.is_empty() {
        debug!(stderr = %String::from_utf8_lossy(&output.stderr), "build tool stderr");
    }

    if !output.status.success() {
        let stderr_tail = tail_lines(&String::from_utf8_lossy(&output.stderr), 20);
        return Err(match step {
            Step::Configure => PrepareError::ConfigureFailed {
                status: output.status,
                stderr_tail,
            },
            Step::Build => PrepareError::BuildFailed {
                status: output.status,
                stderr_tail,
            },
        });
    }

    Ok(())
}

fn tail_lines(text: &str, limit: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(limit);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_arguments_select_generator_build_type_and_suffix() {
        let tool = BuildTool::new("/usr/bin/cmake");
        let invocation = tool.configure_invocation(Path::new("/vendor/assimp"), "Release");

        assert_eq!(invocation.program, Path::new("/usr/bin/cmake"));
        assert_eq!(invocation.working_dir, Path::new("/vendor/assimp"));
        assert_eq!(&invocation.args[..2], ["-G", "Ninja"]);
        assert!(invocation.args.contains(&"-DCMAKE_BUILD_TYPE=Release".to_string()));
        assert!(invocation.args.contains(&"-DLIBRARY_SUFFIX:STRING=".to_string()));
        assert_eq!(invocation.args.last().unwrap(), "CMakeLists.txt");
    }

    #[test]
    fn build_invocation_drives_the_configured_tree() {
        let tool = BuildTool::new("/usr/bin/cmake");
        let invocation = tool.build_invocation(Path::new("/vendor/assimp"));

        assert_eq!(invocation.args, ["--build", "."]);
        assert_eq!(invocation.working_dir, Path::new("/vendor/assimp"));
    }

    #[test]
    fn build_shares_the_configure_working_directory() {
        let tool = BuildTool::new("cmake");
        let source = Path::new("/vendor/assimp");
        assert_eq!(
            tool.configure_invocation(source, "Release").working_dir,
            tool.build_invocation(source).working_dir,
        );
    }

    #[cfg(unix)]
    mod unix {
        use super::super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
            let path = dir.join(name);
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            let mut perms = fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&path, perms).unwrap();
            path
        }

        #[test]
        fn missing_executable_is_a_launch_error() {
            let tmp = tempfile::tempdir().unwrap();
            let tool = BuildTool::new("/nonexistent/bin/cmake");

            let err = tool.configure(tmp.path(), "Release").unwrap_err();
            assert!(matches!(err, PrepareError::ToolLaunch { .. }));
        }

        #[test]
        fn nonzero_configure_exit_is_fatal_and_typed() {
            let tmp = tempfile::tempdir().unwrap();
            let exe = write_script(tmp.path(), "cmake", "echo broken >&2\nexit 3");
            let tool = BuildTool::new(exe);

            let err = tool.configure(tmp.path(), "Release").unwrap_err();
            match err {
                PrepareError::ConfigureFailed { status, stderr_tail } => {
                    assert_eq!(status.code(), Some(3));
                    assert!(stderr_tail.contains("broken"));
                }
                other => panic!("expected ConfigureFailed, got {other:?}"),
            }
        }

        #[test]
        fn nonzero_build_exit_is_fatal_and_typed() {
            let tmp = tempfile::tempdir().unwrap();
            let exe = write_script(tmp.path(), "cmake", "exit 1");
            let tool = BuildTool::new(exe);

            let err = tool.build(tmp.path()).unwrap_err();
            assert!(matches!(err, PrepareError::BuildFailed { .. }));
        }

        #[test]
        fn successful_invocation_returns_ok() {
            let tmp = tempfile::tempdir().unwrap();
            let exe = write_script(tmp.path(), "cmake", "exit 0");
            let tool = BuildTool::new(exe);

            tool.configure(tmp.path(), "Release").unwrap();
            tool.build(tmp.path()).unwrap();
        }
    }

    #[test]
    fn tail_keeps_only_the_last_lines() {
        let text = (1..=30).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let tail = tail_lines(&text, 20);
        assert!(tail.starts_with("11"));
        assert!(tail.ends_with("30"));
    }
}
