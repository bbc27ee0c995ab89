//! Manifest reading: `pyproject.toml` -> [`Project`].
//!
//! The manifest declares the project's identity and, optionally, an ordered
//! table of named build steps under `[tool.wheelwright.build_scripts]`.
//! A `Project` is constructed once per build invocation and is immutable
//! afterwards; no stage reads ambient process state.

use std::path::{Path, PathBuf};

use toml::Value;
use wheelwright_schema::ProjectId;

use crate::error::BuildError;

/// Manifest filename expected at the source-tree root.
pub const MANIFEST_FILE: &str = "pyproject.toml";

/// Key of the tool-specific build-step table.
const BUILD_SCRIPTS_KEY: &str = "build_scripts";

/// Identity of the build plus everything the manifest declared about it.
#[derive(Debug, Clone)]
pub struct Project {
    /// Name, version, and derived composite identifier.
    pub id: ProjectId,
    /// Root of the source tree the manifest was read from.
    pub source_root: PathBuf,
    /// Declared build steps in manifest declaration order. The
    /// configuration value is opaque and passed through unmodified.
    pub build_scripts: Vec<(String, Value)>,
}

impl Project {
    /// Load and validate the manifest at `<source_root>/pyproject.toml`.
    ///
    /// # Errors
    ///
    /// `ManifestNotFound` if the file is absent, `ManifestMalformed` if it
    /// is not valid TOML, `ManifestIncomplete` if `project.name` or
    /// `project.version` is missing, empty, or not a string.
    pub fn load(source_root: &Path) -> Result<Self, BuildError> {
        let path = source_root.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(BuildError::ManifestNotFound { path });
        }

        let content = std::fs::read_to_string(&path)?;
        let table: toml::Table =
            content
                .parse()
                .map_err(|source| BuildError::ManifestMalformed {
                    path: path.clone(),
                    source: Box::new(source),
                })?;

        let name = required_str(&table, &path, "project", "name", "project.name")?;
        let version = required_str(&table, &path, "project", "version", "project.version")?;
        let build_scripts = build_scripts(&table);

        tracing::debug!(name, version, steps = build_scripts.len(), "loaded manifest");

        Ok(Self {
            id: ProjectId::new(name, version),
            source_root: source_root.to_path_buf(),
            build_scripts,
        })
    }
}

/// Fetch a required non-empty string at `[section] key`.
fn required_str<'t>(
    table: &'t toml::Table,
    path: &Path,
    section: &str,
    key: &str,
    dotted: &'static str,
) -> Result<&'t str, BuildError> {
    table
        .get(section)
        .and_then(Value::as_table)
        .and_then(|s| s.get(key))
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| BuildError::ManifestIncomplete {
            path: path.to_path_buf(),
            key: dotted,
        })
}

/// Extract `[tool.wheelwright.build_scripts]`, preserving declaration order.
/// Absence of the section means zero build steps, not an error.
fn build_scripts(table: &toml::Table) -> Vec<(String, Value)> {
    table
        .get("tool")
        .and_then(Value::as_table)
        .and_then(|t| t.get("wheelwright"))
        .and_then(Value::as_table)
        .and_then(|t| t.get(BUILD_SCRIPTS_KEY))
        .and_then(Value::as_table)
        .map(|t| t.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default()
}
