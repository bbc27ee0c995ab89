//! Bodies of the three dist-info metadata records.
//!
//! Each record is a list of lines; the writer joins them with `\n`, so the
//! trailing empty line gives every record file a final newline. Generating
//! a record twice from the same inputs yields byte-identical content.

use crate::digest::RecordDigest;
use crate::project::ProjectId;

/// Core-metadata format version emitted in `METADATA` and `PKG-INFO`.
pub const METADATA_VERSION: &str = "2.4";

/// Archive-format version emitted in `WHEEL`.
pub const WHEEL_FORMAT_VERSION: &str = "1.0";

/// Lines of the core metadata record (`METADATA` in a wheel, `PKG-INFO`
/// in an sdist). Name and version are emitted raw, not normalized.
pub fn core_metadata(id: &ProjectId) -> Vec<String> {
    vec![
        format!("Metadata-Version: {METADATA_VERSION}"),
        format!("Name: {}", id.name),
        format!("Version: {}", id.version),
        String::new(),
    ]
}

/// Lines of the `WHEEL` record.
///
/// `Root-Is-Purelib` is always `true`: this backend only ever produces
/// pure, platform-independent packages.
pub fn wheel_metadata(generator: &str) -> Vec<String> {
    vec![
        format!("Wheel-Version: {WHEEL_FORMAT_VERSION}"),
        format!("Generator: {generator}"),
        "Root-Is-Purelib: true".to_string(),
        String::new(),
    ]
}

/// One row of the `RECORD` file: path relative to the staging root, content
/// digest, and byte size.
///
/// The `RECORD` file lists itself with empty digest and size fields (it
/// cannot hash itself before being fully written).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    /// Path relative to the staging root, `/`-separated.
    pub path: String,
    /// Content digest, or `None` for the self-referencing row.
    pub digest: Option<RecordDigest>,
    /// Byte size, or `None` for the self-referencing row.
    pub size: Option<u64>,
}

impl RecordEntry {
    /// Row for a hashed file.
    pub fn hashed(path: impl Into<String>, digest: RecordDigest, size: u64) -> Self {
        Self {
            path: path.into(),
            digest: Some(digest),
            size: Some(size),
        }
    }

    /// Self-referencing row with empty digest and size fields.
    pub fn unhashed(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            digest: None,
            size: None,
        }
    }
}

impl std::fmt::Display for RecordEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.digest, self.size) {
            (Some(digest), Some(size)) => {
                write!(f, "{},sha256={digest},{size}", self.path)
            }
            _ => write!(f, "{},,", self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn core_metadata_uses_raw_name_and_version() {
        let id = ProjectId::new("demo-pkg", "1.0.0");
        let lines = core_metadata(&id);
        assert_eq!(
            lines,
            vec![
                "Metadata-Version: 2.4".to_string(),
                "Name: demo-pkg".to_string(),
                "Version: 1.0.0".to_string(),
                String::new(),
            ]
        );
    }

    #[test]
    fn wheel_metadata_declares_purelib_root() {
        let lines = wheel_metadata("wheelwright/0.1.0");
        assert_eq!(lines[0], "Wheel-Version: 1.0");
        assert_eq!(lines[1], "Generator: wheelwright/0.1.0");
        assert_eq!(lines[2], "Root-Is-Purelib: true");
        assert_eq!(lines[3], "");
    }

    #[test]
    fn hashed_entry_row_format() {
        let digest = RecordDigest::from_reader(Cursor::new(b"x".as_slice())).unwrap();
        let entry = RecordEntry::hashed("pkg/mod.py", digest.clone(), 1);
        assert_eq!(entry.to_string(), format!("pkg/mod.py,sha256={digest},1"));
    }

    #[test]
    fn unhashed_entry_has_empty_fields() {
        let entry = RecordEntry::unhashed("demo_pkg-1_0_0.dist-info/RECORD");
        assert_eq!(entry.to_string(), "demo_pkg-1_0_0.dist-info/RECORD,,");
    }
}
