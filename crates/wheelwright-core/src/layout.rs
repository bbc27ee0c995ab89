//! Deterministic path layout for a build.
//!
//! Every path the build touches is computed here, once, from the target
//! directory and the project identity. Construction performs no filesystem
//! access; the same inputs always yield the same layout.

use std::path::{Path, PathBuf};

use crate::manifest::{MANIFEST_FILE, Project};

/// Conventional subfolder of the source tree holding build-step scripts,
/// mirrored under the same name in sdist staging.
pub const TOOLS_DIR: &str = "tools";

/// Subfolder of the source tree holding the package code.
pub const SRC_DIR: &str = "src";

/// All paths used during a build. Wheel, editable, and sdist modes use
/// disjoint subsets of the staging tree; no two logical paths collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Output directory the final artifact lands in.
    pub target: PathBuf,
    /// Canonical wheel path: `target/{composite}-{platform}.whl`.
    pub wheel_file: PathBuf,
    /// Canonical sdist path: `target/{composite}.tar.gz`.
    pub sdist_file: PathBuf,

    /// Staging root: `target/{composite}`. Fully disposable.
    pub staging: PathBuf,
    /// Sdist mirror of the source `src/` tree.
    pub staging_src: PathBuf,
    /// Sdist mirror of declared build-step scripts.
    pub staging_tools: PathBuf,
    /// Sdist core-metadata file (`PKG-INFO`).
    pub staging_pkg_info: PathBuf,

    /// Wheel metadata directory: `{composite}.dist-info`.
    pub dist_info: PathBuf,
    /// Core metadata record.
    pub dist_info_metadata: PathBuf,
    /// Archive-format metadata record.
    pub dist_info_wheel: PathBuf,
    /// File-manifest record.
    pub dist_info_record: PathBuf,

    /// Wheel data directory: `{composite}.data`.
    pub data: PathBuf,
    /// Pure-Python install tree; the only data subtree this backend
    /// populates.
    pub data_purelib: PathBuf,
    /// Editable-install link file under purelib.
    pub editable_link: PathBuf,
    /// Platform-specific install tree (never populated).
    pub data_platlib: PathBuf,
    /// Script install tree.
    pub data_scripts: PathBuf,
    /// Header install tree.
    pub data_include: PathBuf,
    /// Platform header install tree.
    pub data_platinclude: PathBuf,
    /// Arbitrary data install tree.
    pub data_data: PathBuf,
    /// Stdlib install tree.
    pub data_stdlib: PathBuf,
    /// Platform stdlib install tree.
    pub data_platstdlib: PathBuf,

    /// Source-tree root.
    pub source: PathBuf,
    /// Source manifest file.
    pub source_manifest: PathBuf,
    /// Source package-code directory.
    pub source_src: PathBuf,
    /// Source build-step script directory.
    pub source_tools: PathBuf,
}

impl Layout {
    /// Compute the layout for building `project` into `target`.
    pub fn new(target: &Path, project: &Project) -> Self {
        let id = &project.id;
        let staging = target.join(&id.composite);
        let dist_info = staging.join(id.dist_info_name());
        let data = staging.join(id.data_dir_name());
        let data_purelib = data.join("purelib");
        let source = project.source_root.clone();

        Self {
            target: target.to_path_buf(),
            wheel_file: target.join(id.wheel_file_name()),
            sdist_file: target.join(id.sdist_file_name()),

            staging_src: staging.join(SRC_DIR),
            staging_tools: staging.join(TOOLS_DIR),
            staging_pkg_info: staging.join("PKG-INFO"),

            dist_info_metadata: dist_info.join("METADATA"),
            dist_info_wheel: dist_info.join("WHEEL"),
            dist_info_record: dist_info.join("RECORD"),
            dist_info,

            editable_link: data_purelib.join(id.editable_link_name()),
            data_platlib: data.join("platlib"),
            data_scripts: data.join("scripts"),
            data_include: data.join("include"),
            data_platinclude: data.join("platinclude"),
            data_data: data.join("data"),
            data_stdlib: data.join("stdlib"),
            data_platstdlib: data.join("platstdlib"),
            data_purelib,
            data,

            source_manifest: source.join(MANIFEST_FILE),
            source_src: source.join(SRC_DIR),
            source_tools: source.join(TOOLS_DIR),
            source,

            staging,
        }
    }
}
