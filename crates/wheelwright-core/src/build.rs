//! Build orchestration: the three build modes exposed to the packaging
//! frontend.
//!
//! Each mode stages under a freshly-cleaned directory owned by the
//! invocation, produces exactly one artifact in the target directory, and
//! returns the artifact's file name (not its full path). The staging tree
//! is removed again whether the build succeeds or fails.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::archive;
use crate::error::BuildError;
use crate::fsx::{self, StagingDir};
use crate::layout::Layout;
use crate::manifest::{MANIFEST_FILE, Project};
use crate::metadata;
use crate::steps;

/// Opaque frontend settings (`config_settings` in the frontend contract).
/// Accepted and passed through; this backend does not interpret them.
pub type Settings = BTreeMap<String, String>;

/// Extra requirements the frontend must install before invoking any build
/// mode. The backend is a native binary and needs nothing installed into
/// the build environment.
const EXTRA_REQUIRES: &[&str] = &[];

/// The fixed declared extra-requirements list, identical for wheel, sdist,
/// and editable builds.
pub fn build_requires() -> &'static [&'static str] {
    EXTRA_REQUIRES
}

/// Build a wheel: mirror the package code into the staged purelib tree,
/// run declared build steps, generate dist-info, and zip.
///
/// Returns the produced wheel's file name.
///
/// # Errors
///
/// Any [`BuildError`]; on failure no new artifact and no staging residue
/// remain.
pub fn build_wheel(
    source_root: &Path,
    target: &Path,
    settings: Option<&Settings>,
) -> Result<String, BuildError> {
    build_wheel_mode(source_root, target, settings, false)
}

/// Build an editable wheel: instead of copying the package code, stage a
/// link file holding the absolute path of the source `src/` directory, so
/// the installed package resolves to the live source tree.
///
/// # Errors
///
/// Any [`BuildError`]; on failure no new artifact and no staging residue
/// remain.
pub fn build_editable(
    source_root: &Path,
    target: &Path,
    settings: Option<&Settings>,
) -> Result<String, BuildError> {
    build_wheel_mode(source_root, target, settings, true)
}

fn build_wheel_mode(
    source_root: &Path,
    target: &Path,
    settings: Option<&Settings>,
    editable: bool,
) -> Result<String, BuildError> {
    let project = Project::load(source_root)?;
    let layout = Layout::new(target, &project);
    log_settings(settings);

    fs::create_dir_all(target)?;
    let staging = StagingDir::create(&layout.staging)?;

    if editable {
        let src = std::path::absolute(&layout.source_src)?;
        fsx::write_lines(&layout.editable_link, &[src.display().to_string()])?;
    } else if layout.source_src.is_dir() {
        fsx::mirror_tree(&layout.source_src, &layout.data_purelib)?;
    }

    steps::run_all(&project, &layout)?;
    metadata::generate_dist_info(&project, &layout)?;

    let wheel = archive::zip_dir(staging.path(), &layout.wheel_file)?;
    tracing::info!(artifact = %wheel.display(), editable, "built wheel");
    Ok(file_name(&wheel))
}

/// Build a source distribution: manifest, filtered package code, and
/// declared build-step scripts under one `{composite}` top-level
/// directory, with a `PKG-INFO` core-metadata record.
///
/// Returns the produced archive's file name.
///
/// # Errors
///
/// `BuildStepNotFound` if any declared step's script is missing (checked
/// before any archive is written), otherwise any [`BuildError`].
pub fn build_sdist(
    source_root: &Path,
    target: &Path,
    settings: Option<&Settings>,
) -> Result<String, BuildError> {
    let project = Project::load(source_root)?;
    let layout = Layout::new(target, &project);
    log_settings(settings);

    fs::create_dir_all(target)?;
    let staging = StagingDir::create(&layout.staging)?;

    fs::copy(&layout.source_manifest, layout.staging.join(MANIFEST_FILE))?;
    if layout.source_src.is_dir() {
        fsx::mirror_tree(&layout.source_src, &layout.staging_src)?;
    }

    for (name, _) in &project.build_scripts {
        let step = steps::resolve(&project.source_root, name)?;
        fs::create_dir_all(&layout.staging_tools)?;
        fs::copy(step.script(), layout.staging_tools.join(name))?;
    }

    metadata::write_pkg_info(&project, &layout)?;

    let sdist = archive::tar_gz_dir(staging.path(), &layout.sdist_file, &project.id.composite)?;
    tracing::info!(artifact = %sdist.display(), "built sdist");
    Ok(file_name(&sdist))
}

fn log_settings(settings: Option<&Settings>) {
    if let Some(settings) = settings {
        if !settings.is_empty() {
            tracing::debug!(?settings, "frontend settings accepted but not interpreted");
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
