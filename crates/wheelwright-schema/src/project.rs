//! Project identity and artifact naming.
//!
//! A [`ProjectId`] is constructed once per build from the raw `name` and
//! `version` strings in the manifest and never mutated afterwards. Every
//! artifact and staging directory name derives from its composite
//! identifier.

use serde::{Deserialize, Serialize};

/// Platform tag emitted for every wheel this backend produces.
///
/// The backend only builds pure, platform-independent packages, so the tag
/// is a constant and is never probed from the running environment.
pub const PLATFORM_TAG: &str = "py3-none-any";

/// Collapse every run of non-alphanumeric characters to a single `_`.
///
/// Case is preserved: `My.Pkg--2` becomes `My_Pkg_2`.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_run = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// Identity of the thing being built, as declared by the manifest.
///
/// `name` and `version` are kept raw for metadata records; the composite
/// identifier joins their normalized forms and names every artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectId {
    /// Project name, verbatim from the manifest.
    pub name: String,
    /// Project version, verbatim from the manifest.
    pub version: String,
    /// `{normalized-name}-{normalized-version}`.
    pub composite: String,
}

impl ProjectId {
    /// Build a `ProjectId` from raw manifest values.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        let version = version.into();
        let composite = format!("{}-{}", normalize(&name), normalize(&version));
        Self {
            name,
            version,
            composite,
        }
    }

    /// Canonical wheel filename: `{composite}-{platform}.whl`.
    pub fn wheel_file_name(&self) -> String {
        format!("{}-{PLATFORM_TAG}.whl", self.composite)
    }

    /// Canonical sdist filename: `{composite}.tar.gz`.
    pub fn sdist_file_name(&self) -> String {
        format!("{}.tar.gz", self.composite)
    }

    /// Name of the metadata directory inside a wheel: `{composite}.dist-info`.
    pub fn dist_info_name(&self) -> String {
        format!("{}.dist-info", self.composite)
    }

    /// Name of the data directory inside a wheel: `{composite}.data`.
    pub fn data_dir_name(&self) -> String {
        format!("{}.data", self.composite)
    }

    /// Name of the editable-install link file: `__editable__.{composite}.pth`.
    pub fn editable_link_name(&self) -> String {
        format!("__editable__.{}.pth", self.composite)
    }
}
