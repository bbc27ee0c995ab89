//! Content digests for `RECORD` entries.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Read granularity for hashing. Bounds memory use regardless of file size.
const BLOCK_SIZE: usize = 64 * 1024;

/// A file content digest in `RECORD` encoding: SHA-256, URL-safe base64,
/// trailing `=` padding stripped.
///
/// Identical byte content always yields an identical digest string,
/// independent of file path or timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordDigest(String);

impl RecordDigest {
    /// Hash a file by streaming it in 64 KiB blocks.
    ///
    /// The whole file is never loaded into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read; digest
    /// computation itself never fails.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Hash the full contents of a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut hasher = Sha256::new();
        let mut block = vec![0u8; BLOCK_SIZE];
        loop {
            let n = reader.read(&mut block)?;
            if n == 0 {
                break;
            }
            hasher.update(&block[..n]);
        }
        Ok(Self(URL_SAFE_NO_PAD.encode(hasher.finalize())))
    }

    /// Return the encoded digest as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RecordDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
