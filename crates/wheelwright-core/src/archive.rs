//! Archive creation for the two distribution formats.
//!
//! Both writers stage the archive under a scratch name next to the final
//! path and only rename it into place on full success, so a partial
//! archive is never left at the canonical location.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::BuildError;
use crate::metadata::relative_unix_path;

/// Package the staging tree into a zip archive at `dest`.
///
/// Entries are relative to the staging root; the staging directory name
/// itself does not appear as a path prefix.
///
/// # Errors
///
/// `ArchiveWrite` on any zip-level fault, `Io` on filesystem faults.
pub fn zip_dir(staging: &Path, dest: &Path) -> Result<PathBuf, BuildError> {
    let scratch = scratch_name(dest);
    let result = write_zip(staging, &scratch);
    finalize(result, &scratch, dest)
}

fn write_zip(staging: &Path, scratch: &Path) -> Result<(), BuildError> {
    let file = File::create(scratch)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for entry in WalkDir::new(staging) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = relative_unix_path(entry.path(), staging)?;
        zip.start_file(rel, options)
            .map_err(|e| BuildError::ArchiveWrite(e.to_string()))?;
        let mut src = File::open(entry.path())?;
        io::copy(&mut src, &mut zip)?;
    }

    let mut inner = zip
        .finish()
        .map_err(|e| BuildError::ArchiveWrite(e.to_string()))?;
    inner.flush()?;
    Ok(())
}

/// Package the staging tree into a gzip-compressed tar archive at `dest`,
/// with `root_name` as the sole top-level entry. Source distributions are
/// expected to unpack into one directory.
///
/// # Errors
///
/// `ArchiveWrite` on tar/gzip faults, `Io` on filesystem faults.
pub fn tar_gz_dir(staging: &Path, dest: &Path, root_name: &str) -> Result<PathBuf, BuildError> {
    let scratch = scratch_name(dest);
    let result = write_tar_gz(staging, &scratch, root_name);
    finalize(result, &scratch, dest)
}

fn write_tar_gz(staging: &Path, scratch: &Path, root_name: &str) -> Result<(), BuildError> {
    let file = File::create(scratch)?;
    let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.follow_symlinks(false);

    builder
        .append_dir_all(root_name, staging)
        .map_err(|e| BuildError::ArchiveWrite(e.to_string()))?;
    builder
        .finish()
        .map_err(|e| BuildError::ArchiveWrite(e.to_string()))?;
    let mut inner = builder
        .into_inner()
        .map_err(|e| BuildError::ArchiveWrite(e.to_string()))?
        .finish()
        .map_err(|e| BuildError::ArchiveWrite(e.to_string()))?;
    inner.flush()?;
    Ok(())
}

/// Move the scratch archive to its canonical path, or clean it up on
/// failure.
fn finalize(
    result: Result<(), BuildError>,
    scratch: &Path,
    dest: &Path,
) -> Result<PathBuf, BuildError> {
    match result {
        Ok(()) => {
            fs::rename(scratch, dest)?;
            Ok(dest.to_path_buf())
        }
        Err(err) => {
            if scratch.exists() {
                let _ = fs::remove_file(scratch);
            }
            Err(err)
        }
    }
}

fn scratch_name(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}
