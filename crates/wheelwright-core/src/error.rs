//! Domain-specific errors for the build pipeline.
//!
//! Every stage fails fast: a build either fully succeeds and yields exactly
//! one artifact file, or it fails and leaves no new artifact and no staging
//! residue.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Fatal build failures, in pipeline order.
#[derive(Error, Debug)]
pub enum BuildError {
    /// No manifest file at the source-tree root.
    #[error("manifest not found: {}", path.display())]
    ManifestNotFound {
        /// Path that was probed.
        path: PathBuf,
    },

    /// The manifest exists but is not valid TOML.
    #[error("failed to parse {}: {source}", path.display())]
    ManifestMalformed {
        /// Path of the unparseable manifest.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// The manifest parsed but a required key is missing, empty, or not a
    /// string.
    #[error("manifest {} is missing required key '{key}'", path.display())]
    ManifestIncomplete {
        /// Path of the incomplete manifest.
        path: PathBuf,
        /// Dotted key that could not be used.
        key: &'static str,
    },

    /// A declared build step has no matching script under `tools/`.
    #[error("build step '{name}' has no script at {}", path.display())]
    BuildStepNotFound {
        /// The declared step name.
        name: String,
        /// Path where the script was expected.
        path: PathBuf,
    },

    /// A build-step process exited with a non-zero status.
    #[error("build step '{name}' failed: {status}")]
    BuildStepFailed {
        /// The step that failed.
        name: String,
        /// Exit status of the step process.
        status: ExitStatus,
    },

    /// Read/copy/hash failure anywhere in the pipeline.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The archival primitive failed.
    #[error("archive error: {0}")]
    ArchiveWrite(String),
}
