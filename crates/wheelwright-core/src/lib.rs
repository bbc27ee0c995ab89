//! wheelwright-core: the build pipeline behind the `wheelwright` backend.
//!
//! Given a source tree with a `pyproject.toml`, this crate stages and
//! packages a wheel, an editable wheel, or an sdist. Data flows one
//! direction: [`manifest`] -> [`layout`] -> {[`steps`], [`metadata`]} ->
//! [`archive`] -> [`build`] returns the artifact filename to the caller.
//! The pipeline is single-threaded and synchronous; each stage completes
//! fully before the next begins.

pub mod archive;
pub mod build;
pub mod download;
pub mod error;
pub mod fsx;
pub mod layout;
pub mod manifest;
pub mod metadata;
pub mod steps;
pub mod tasks;

pub use build::{build_editable, build_requires, build_sdist, build_wheel};
pub use error::BuildError;
pub use layout::Layout;
pub use manifest::Project;

/// Generator identity, emitted in `WHEEL` records and HTTP requests.
pub const USER_AGENT: &str = concat!("wheelwright/", env!("CARGO_PKG_VERSION"));
