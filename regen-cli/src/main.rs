//! Regen — generated-region maintenance for test fixtures.
//!
//! # Usage
//!
//! ```text
//! regen sync <FILE> [--subst PATTERN REPLACEMENT]... [--dry-run] [--json]
//! regen propagate <DOCUMENT> --edited <FILE>... [--command <CMD>]... [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{propagate::PropagateArgs, sync::SyncArgs};

#[derive(Parser, Debug)]
#[command(
    name = "regen",
    version,
    about = "Keep machine-generated regions of test fixtures in sync",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a fixture's GENERATED-BY command and update its generated region.
    Sync(SyncArgs),

    /// Splice edited split-file slices back into their flattened document.
    Propagate(PropagateArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Propagate(args) => args.run(),
    }
}
