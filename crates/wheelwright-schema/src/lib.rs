//! Shared types and wire formats for the wheelwright build backend.
//!
//! This crate holds the values that every stage of a build agrees on: the
//! project identity and its normalized composite name, the content digest
//! format used in `RECORD` files, and the bodies of the three dist-info
//! metadata records. Everything here is either pure or limited to reading
//! the file being hashed; staging-tree I/O lives in `wheelwright-core`.

pub mod digest;
pub mod project;
pub mod records;

pub use digest::RecordDigest;
pub use project::{PLATFORM_TAG, ProjectId, normalize};
pub use records::{METADATA_VERSION, RecordEntry, WHEEL_FORMAT_VERSION};
