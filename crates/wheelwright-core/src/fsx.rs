//! Filesystem helpers shared by the build stages.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// Directory names excluded when mirroring package code.
const EXCLUDED_DIRS: &[&str] = &["__pycache__"];

/// File suffix excluded when mirroring package code.
const EXCLUDED_SUFFIX: &str = ".pyc";

/// Write `lines` to `path` joined with `\n`, creating parent directories.
///
/// Record bodies carry a trailing empty line, so the written file ends
/// with a newline.
pub fn write_lines(path: &Path, lines: &[String]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, lines.join("\n"))
}

/// Mirror `src` into `dest` byte-for-byte, excluding build-cache artifacts
/// (`__pycache__/` directories and `*.pyc` files).
pub fn mirror_tree(src: &Path, dest: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src).into_iter().filter_entry(included) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn included(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if entry.file_type().is_dir() {
        !EXCLUDED_DIRS.contains(&name.as_ref())
    } else {
        !name.ends_with(EXCLUDED_SUFFIX)
    }
}

/// A staging directory exclusively owned by one build invocation.
///
/// Creation removes any pre-existing directory at the path; dropping the
/// guard removes the directory again, on success and failure paths alike,
/// so no stale staging residue survives and no partially-staged tree is
/// ever mistaken for a prior build's output.
#[derive(Debug)]
pub struct StagingDir {
    path: PathBuf,
}

impl StagingDir {
    /// Clean-create the staging directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing directory cannot be removed or the
    /// fresh one cannot be created.
    pub fn create(path: &Path) -> io::Result<Self> {
        if path.exists() {
            fs::remove_dir_all(path)?;
        }
        fs::create_dir_all(path)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// The staging root.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_dir_all(&self.path) {
            tracing::debug!(path = %self.path.display(), %err, "staging cleanup failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_lines_creates_parents_and_joins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a/b/METADATA");
        write_lines(
            &path,
            &["one".to_string(), "two".to_string(), String::new()],
        )
        .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn mirror_tree_copies_files_and_dirs() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("pkg/sub")).unwrap();
        fs::write(src.join("pkg/__init__.py"), "init").unwrap();
        fs::write(src.join("pkg/sub/mod.py"), "mod").unwrap();

        let dest = dir.path().join("dest");
        mirror_tree(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("pkg/__init__.py")).unwrap(), "init");
        assert_eq!(fs::read_to_string(dest.join("pkg/sub/mod.py")).unwrap(), "mod");
    }

    #[test]
    fn mirror_tree_skips_cache_artifacts() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("pkg/__pycache__")).unwrap();
        fs::write(src.join("pkg/__pycache__/mod.cpython-312.pyc"), "x").unwrap();
        fs::write(src.join("pkg/stale.pyc"), "x").unwrap();
        fs::write(src.join("pkg/mod.py"), "keep").unwrap();

        let dest = dir.path().join("dest");
        mirror_tree(&src, &dest).unwrap();

        assert!(dest.join("pkg/mod.py").exists());
        assert!(!dest.join("pkg/__pycache__").exists());
        assert!(!dest.join("pkg/stale.pyc").exists());
    }

    #[test]
    fn staging_dir_replaces_existing_and_cleans_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("staging");
        fs::create_dir_all(path.join("stale")).unwrap();
        fs::write(path.join("stale/residue.txt"), "old").unwrap();

        {
            let staging = StagingDir::create(&path).unwrap();
            assert!(staging.path().exists());
            assert!(!staging.path().join("stale").exists());
            fs::write(staging.path().join("work.txt"), "new").unwrap();
        }

        assert!(!path.exists());
    }
}
