//! `regen propagate` — splice edited slices back into their document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use regen_sync::{propagate, SpliceOutcome};

/// Arguments for `regen propagate`.
#[derive(Args, Debug)]
pub struct PropagateArgs {
    /// The flattened document the slices were split from.
    pub document: PathBuf,

    /// A materialized slice file that was edited externally; may be repeated.
    #[arg(long = "edited", required = true, value_name = "FILE")]
    pub edited: Vec<PathBuf>,

    /// A shell command the test harness was about to run; scanned for the
    /// split-file invocation that ties the document to its split directory.
    /// May be repeated.
    #[arg(long = "command", value_name = "CMD")]
    pub commands: Vec<String>,

    /// Emit the outcomes as a JSON array instead of plain text.
    #[arg(long)]
    pub json: bool,
}

impl PropagateArgs {
    pub fn run(self) -> Result<()> {
        let results = propagate(&self.document, &self.edited, &self.commands)
            .with_context(|| format!("propagate failed for '{}'", self.document.display()))?;

        if self.json {
            println!("{}", serde_json::to_string(&results)?);
            return Ok(());
        }

        for result in &results {
            match result {
                SpliceOutcome::Spliced { .. } => println!("updated {result}"),
                SpliceOutcome::Passthrough { path } => println!("{}", path.display()),
            }
        }
        Ok(())
    }
}
