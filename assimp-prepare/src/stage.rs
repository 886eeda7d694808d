//! Artifact staging primitives: overwrite copies and symlink materialization.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Create the staging directory if it does not exist yet. Destinations must
/// exist before any copy is attempted.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

/// Copy `source` over `dest`, clearing a read-only attribute on an existing
/// destination first (a read-only leftover from a previous packaging run
/// would otherwise make the overwrite fail).
pub fn copy_artifact(source: &Path, dest: &Path) -> io::Result<u64> {
    if dest.exists() {
        let mut perms = fs::metadata(dest)?.permissions();
        if perms.readonly() {
            perms.set_readonly(false);
            fs::set_permissions(dest, perms)?;
        }
    }
    debug!(source = %source.display(), dest = %dest.display(), "copying artifact");
    fs::copy(source, dest)
}

/// What a [`materialize_symlinks`] pass did to a directory.
#[derive(Debug, Default)]
pub struct SymlinkOutcome {
    /// Symlinks that were replaced with real copies of their targets.
    pub converted: Vec<PathBuf>,
    /// Symlinks whose target could not be resolved; left untouched.
    pub unresolved: Vec<PathBuf>,
}

/// Replace every symlink in `dir` whose name matches `pattern` with a real
/// copy of its fully-resolved target.
///
/// The downstream packaging step does not dereference symlinks; staging one
/// produces a size-mismatched artifact. Regular files matching the pattern
/// are skipped, so a second pass over the same directory is a no-op.
pub fn materialize_symlinks(dir: &Path, pattern: &str) -> io::Result<SymlinkOutcome> {
    let mut outcome = SymlinkOutcome::default();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if !wildcard_match(name, pattern) {
            continue;
        }
        if !fs::symlink_metadata(&path)?.file_type().is_symlink() {
            continue;
        }

        // Resolve through the whole link chain before deleting anything.
        let target = match fs::canonicalize(&path) {
            Ok(target) => target,
            Err(_) => {
                outcome.unresolved.push(path);
                continue;
            }
        };

        debug!(link = %path.display(), target = %target.display(), "materializing symlink");
        fs::remove_file(&path)?;
        fs::copy(&target, &path)?;
        outcome.converted.push(path);
    }

    Ok(outcome)
}

/// Minimal `*` glob match over file names.
pub fn wildcard_match(name: &str, pattern: &str) -> bool {
    let name = name.as_bytes();
    let pattern = pattern.as_bytes();
    let (mut n, mut p) = (0usize, 0usize);
    let mut star: Option<(usize, usize)> = None;

    while n < name.len() {
        if p < pattern.len() && pattern[p] == name[n] {
            n += 1;
            p += 1;
        } else if p < pattern.len() && pattern[p] == b'*' {
            star = Some((p, n));
            p += 1;
        } else if let Some((star_p, star_n)) = star {
            p = star_p + 1;
            n = star_n + 1;
            star = Some((star_p, star_n + 1));
        } else {
            return false;
        }
    }
    while p < pattern.len() && pattern[p] == b'*' {
        p += 1;
    }
    p == pattern.len()
}
