//! wheelwright - build-frontend command line interface.
//!
//! Exposes the backend's entry points to the surrounding packaging
//! toolchain: build a wheel, an editable wheel, or an sdist into an output
//! directory, and list the declared extra build requirements. Every build
//! command prints the produced file's name on stdout; any failure exits
//! non-zero.

pub mod cmd;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use wheelwright_core::build::Settings;

/// Top-level argument parser for the `wheelwright` binary.
#[derive(Debug, Parser)]
#[command(name = "wheelwright", version, about = "Build backend for pure-Python packages")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// The build-frontend entry points.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a wheel into the output directory.
    Wheel {
        /// Directory the finished wheel is written to.
        out_dir: PathBuf,
        /// Source tree containing pyproject.toml.
        #[arg(long, default_value = ".")]
        source_dir: PathBuf,
        /// Frontend config settings as KEY=VALUE pairs.
        #[arg(short = 'C', long = "config-setting", value_name = "KEY=VALUE")]
        settings: Vec<String>,
    },
    /// Build an editable wheel that links back to the source tree.
    Editable {
        /// Directory the finished wheel is written to.
        out_dir: PathBuf,
        /// Source tree containing pyproject.toml.
        #[arg(long, default_value = ".")]
        source_dir: PathBuf,
        /// Frontend config settings as KEY=VALUE pairs.
        #[arg(short = 'C', long = "config-setting", value_name = "KEY=VALUE")]
        settings: Vec<String>,
    },
    /// Build a source distribution into the output directory.
    Sdist {
        /// Directory the finished archive is written to.
        out_dir: PathBuf,
        /// Source tree containing pyproject.toml.
        #[arg(long, default_value = ".")]
        source_dir: PathBuf,
        /// Frontend config settings as KEY=VALUE pairs.
        #[arg(short = 'C', long = "config-setting", value_name = "KEY=VALUE")]
        settings: Vec<String>,
    },
    /// Print the extra requirements needed for any build mode.
    Requires,
}

/// Parse `-C KEY=VALUE` pairs into a settings map.
///
/// # Errors
///
/// Returns an error for a pair without a `=` separator.
pub fn parse_settings(pairs: &[String]) -> Result<Settings> {
    let mut settings = Settings::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("invalid config setting '{pair}': expected KEY=VALUE");
        };
        settings.insert(key.to_string(), value.to_string());
    }
    Ok(settings)
}
