//! wheelwright - build backend CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wheelwright_cli::cmd;
use wheelwright_cli::{Cli, Commands, parse_settings};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Wheel {
            out_dir,
            source_dir,
            settings,
        } => cmd::wheel::wheel(&out_dir, &source_dir, &parse_settings(&settings)?),
        Commands::Editable {
            out_dir,
            source_dir,
            settings,
        } => cmd::editable::editable(&out_dir, &source_dir, &parse_settings(&settings)?),
        Commands::Sdist {
            out_dir,
            source_dir,
            settings,
        } => cmd::sdist::sdist(&out_dir, &source_dir, &parse_settings(&settings)?),
        Commands::Requires => {
            cmd::requires::requires();
            Ok(())
        }
    }
}
