//! `wheelwright editable` - build an editable wheel.

use std::path::Path;

use anyhow::Result;
use wheelwright_core::build::Settings;

/// Build an editable wheel and print its file name.
///
/// # Errors
///
/// Returns an error if the build fails at any stage.
pub fn editable(out_dir: &Path, source_dir: &Path, settings: &Settings) -> Result<()> {
    let name = wheelwright_core::build_editable(source_dir, out_dir, Some(settings))?;
    println!("{name}");
    Ok(())
}
