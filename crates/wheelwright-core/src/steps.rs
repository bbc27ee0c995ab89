//! Build-step resolution and execution.
//!
//! A build step is a named unit of extension logic identified by an
//! executable script at `<source_root>/tools/<name>`. Steps run as child
//! processes with cwd set to the source tree and the path layout exported
//! through environment variables; a step may write arbitrary files under
//! the staging tree. Side effects are otherwise opaque to the runner; it
//! does not inspect what a step wrote, only whether it failed.
//!
//! ## Environment contract
//!
//! Step processes receive these variables on top of the ambient
//! environment:
//!
//! | Variable | Value |
//! |---|---|
//! | `WHEELWRIGHT_SOURCE` | Source-tree root (also the cwd) |
//! | `WHEELWRIGHT_STAGING` | Staging root |
//! | `WHEELWRIGHT_PURELIB` | Staged purelib data subtree |
//! | `WHEELWRIGHT_SCRIPTS` | Staged scripts data subtree |
//! | `WHEELWRIGHT_DATA` | Staged data directory root |
//! | `WHEELWRIGHT_DIST_INFO` | Staged metadata directory |
//! | `WHEELWRIGHT_CONFIG` | The step's manifest configuration, as JSON |

use std::path::{Path, PathBuf};
use std::process::Command;

use toml::Value;

use crate::error::BuildError;
use crate::layout::{Layout, TOOLS_DIR};
use crate::manifest::Project;

/// A resolved unit of build logic invoked with the path layout and the
/// step's configuration value.
pub trait BuildStep {
    /// Execute the step. Failure aborts the whole build.
    fn run(&self, layout: &Layout, config: &Value) -> Result<(), BuildError>;
}

/// A build step backed by an executable script under `tools/`.
#[derive(Debug, Clone)]
pub struct ScriptStep {
    name: String,
    script: PathBuf,
}

impl ScriptStep {
    /// Path of the resolved script file.
    pub fn script(&self) -> &Path {
        &self.script
    }
}

/// Resolve a declared step name to its script at
/// `<source_root>/tools/<name>`.
///
/// # Errors
///
/// `BuildStepNotFound` naming the step if no script file exists there.
pub fn resolve(source_root: &Path, name: &str) -> Result<ScriptStep, BuildError> {
    let script = source_root.join(TOOLS_DIR).join(name);
    if !script.is_file() {
        return Err(BuildError::BuildStepNotFound {
            name: name.to_string(),
            path: script,
        });
    }
    Ok(ScriptStep {
        name: name.to_string(),
        script,
    })
}

impl BuildStep for ScriptStep {
    fn run(&self, layout: &Layout, config: &Value) -> Result<(), BuildError> {
        let config_json = serde_json::to_string(config).map_err(std::io::Error::other)?;

        tracing::debug!(step = %self.name, script = %self.script.display(), "running build step");

        // The child runs with a different cwd, so every exported path must
        // be absolute even when the caller passed relative roots.
        let script = std::path::absolute(&self.script)?;
        let cwd = std::path::absolute(&layout.source)?;
        let status = Command::new(&script)
            .current_dir(&cwd)
            .env("WHEELWRIGHT_SOURCE", &cwd)
            .env("WHEELWRIGHT_STAGING", std::path::absolute(&layout.staging)?)
            .env("WHEELWRIGHT_PURELIB", std::path::absolute(&layout.data_purelib)?)
            .env("WHEELWRIGHT_SCRIPTS", std::path::absolute(&layout.data_scripts)?)
            .env("WHEELWRIGHT_DATA", std::path::absolute(&layout.data)?)
            .env("WHEELWRIGHT_DIST_INFO", std::path::absolute(&layout.dist_info)?)
            .env("WHEELWRIGHT_CONFIG", config_json)
            .status()?;

        if !status.success() {
            return Err(BuildError::BuildStepFailed {
                name: self.name.clone(),
                status,
            });
        }
        Ok(())
    }
}

/// Run every declared step in manifest declaration order.
///
/// No-op when the step table is empty. All steps are resolved before any
/// runs, so a missing script fails the build before any side effects.
///
/// # Errors
///
/// `BuildStepNotFound` for an unresolvable step, `BuildStepFailed` when a
/// step process exits non-zero.
pub fn run_all(project: &Project, layout: &Layout) -> Result<(), BuildError> {
    if project.build_scripts.is_empty() {
        return Ok(());
    }

    let mut resolved = Vec::with_capacity(project.build_scripts.len());
    for (name, config) in &project.build_scripts {
        resolved.push((resolve(&project.source_root, name)?, config));
    }

    for (step, config) in resolved {
        step.run(layout, config)?;
    }
    Ok(())
}
