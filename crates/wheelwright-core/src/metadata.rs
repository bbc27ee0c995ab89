//! Metadata generation: the three dist-info records plus the sdist
//! `PKG-INFO`.
//!
//! Record bodies come from `wheelwright_schema::records`; this module owns
//! the staging-tree scan and the writes. Regenerating from an unchanged
//! staging tree yields byte-identical content.

use std::path::Path;

use walkdir::WalkDir;
use wheelwright_schema::records::{core_metadata, wheel_metadata};
use wheelwright_schema::{RecordDigest, RecordEntry};

use crate::error::BuildError;
use crate::fsx::write_lines;
use crate::layout::Layout;
use crate::manifest::Project;

/// Write `METADATA`, `WHEEL`, and `RECORD` into the staging dist-info
/// directory.
///
/// `RECORD` rows cover every file under the staging root at scan time
/// (directories excluded, `RECORD` itself excluded), hashed and sized,
/// followed by the self-referencing row with empty fields. Row order is
/// the tree-walk order; no sort is applied.
pub fn generate_dist_info(project: &Project, layout: &Layout) -> Result<(), BuildError> {
    write_lines(&layout.dist_info_metadata, &core_metadata(&project.id))?;
    write_lines(&layout.dist_info_wheel, &wheel_metadata(crate::USER_AGENT))?;

    let mut lines: Vec<String> = record_entries(&layout.staging, &layout.dist_info_record)?
        .iter()
        .map(ToString::to_string)
        .collect();
    lines.push(
        RecordEntry::unhashed(format!("{}/RECORD", project.id.dist_info_name())).to_string(),
    );
    lines.push(String::new());
    write_lines(&layout.dist_info_record, &lines)?;

    tracing::debug!(record_rows = lines.len() - 1, "generated dist-info");
    Ok(())
}

/// Write the sdist core-metadata file (`PKG-INFO`).
///
/// Source distributions carry no `WHEEL` or `RECORD`; per-file hashes are
/// a binary-archive concern.
pub fn write_pkg_info(project: &Project, layout: &Layout) -> Result<(), BuildError> {
    write_lines(&layout.staging_pkg_info, &core_metadata(&project.id))?;
    Ok(())
}

/// Scan the staging tree and build one hashed row per file.
fn record_entries(staging: &Path, record_file: &Path) -> Result<Vec<RecordEntry>, BuildError> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(staging) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() || entry.path() == record_file {
            continue;
        }
        let rel = relative_unix_path(entry.path(), staging)?;
        let digest = RecordDigest::from_file(entry.path())?;
        let size = entry.metadata().map_err(std::io::Error::from)?.len();
        entries.push(RecordEntry::hashed(rel, digest, size));
    }
    Ok(entries)
}

/// Render `path` relative to `root` with `/` separators, as archive
/// consumers expect.
pub(crate) fn relative_unix_path(path: &Path, root: &Path) -> Result<String, BuildError> {
    let rel = path.strip_prefix(root).map_err(std::io::Error::other)?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn stage_demo(target: &Path) -> (Project, Layout) {
        let project = Project {
            id: wheelwright_schema::ProjectId::new("demo-pkg", "1.0.0"),
            source_root: target.join("unused-source"),
            build_scripts: Vec::new(),
        };
        let layout = Layout::new(target, &project);
        fs::create_dir_all(layout.data_purelib.join("demo_pkg")).unwrap();
        fs::write(
            layout.data_purelib.join("demo_pkg/__init__.py"),
            "VERSION = \"1.0.0\"\n",
        )
        .unwrap();
        (project, layout)
    }

    #[test]
    fn record_lists_every_staged_file_once() {
        let dir = tempdir().unwrap();
        let (project, layout) = stage_demo(dir.path());

        generate_dist_info(&project, &layout).unwrap();

        let record = fs::read_to_string(&layout.dist_info_record).unwrap();
        let rows: Vec<&str> = record.lines().collect();
        let init_rows: Vec<&str> = rows
            .iter()
            .copied()
            .filter(|r| r.starts_with("demo_pkg-1_0_0.data/purelib/demo_pkg/__init__.py,sha256="))
            .collect();
        assert_eq!(init_rows.len(), 1);
        assert!(rows.iter().any(|r| r.starts_with("demo_pkg-1_0_0.dist-info/METADATA,sha256=")));
        assert!(rows.iter().any(|r| r.starts_with("demo_pkg-1_0_0.dist-info/WHEEL,sha256=")));
        assert_eq!(*rows.last().unwrap(), "demo_pkg-1_0_0.dist-info/RECORD,,");
        assert!(record.ends_with('\n'));
    }

    #[test]
    fn regeneration_is_byte_identical() {
        let dir = tempdir().unwrap();
        let (project, layout) = stage_demo(dir.path());

        generate_dist_info(&project, &layout).unwrap();
        let metadata1 = fs::read_to_string(&layout.dist_info_metadata).unwrap();
        let wheel1 = fs::read_to_string(&layout.dist_info_wheel).unwrap();
        let record1 = fs::read_to_string(&layout.dist_info_record).unwrap();

        generate_dist_info(&project, &layout).unwrap();
        assert_eq!(metadata1, fs::read_to_string(&layout.dist_info_metadata).unwrap());
        assert_eq!(wheel1, fs::read_to_string(&layout.dist_info_wheel).unwrap());
        assert_eq!(record1, fs::read_to_string(&layout.dist_info_record).unwrap());
    }

    #[test]
    fn metadata_and_wheel_contents() {
        let dir = tempdir().unwrap();
        let (project, layout) = stage_demo(dir.path());

        generate_dist_info(&project, &layout).unwrap();

        let metadata = fs::read_to_string(&layout.dist_info_metadata).unwrap();
        assert_eq!(
            metadata,
            "Metadata-Version: 2.4\nName: demo-pkg\nVersion: 1.0.0\n"
        );

        let wheel = fs::read_to_string(&layout.dist_info_wheel).unwrap();
        assert!(wheel.starts_with("Wheel-Version: 1.0\nGenerator: wheelwright/"));
        assert!(wheel.ends_with("Root-Is-Purelib: true\n"));
    }

    #[test]
    fn pkg_info_matches_core_metadata() {
        let dir = tempdir().unwrap();
        let (project, layout) = stage_demo(dir.path());

        write_pkg_info(&project, &layout).unwrap();
        assert_eq!(
            fs::read_to_string(&layout.staging_pkg_info).unwrap(),
            "Metadata-Version: 2.4\nName: demo-pkg\nVersion: 1.0.0\n"
        );
    }

    #[test]
    fn relative_unix_path_joins_with_slashes() {
        let root = Path::new("/a/b");
        let path = Path::new("/a/b/c/d.txt");
        assert_eq!(relative_unix_path(path, root).unwrap(), "c/d.txt");
    }
}
