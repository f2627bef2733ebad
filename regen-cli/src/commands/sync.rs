//! `regen sync` — run a fixture's GENERATED-BY command and update the file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args};

use regen_sync::{synchronize, Substitution, SyncOutcome};

/// Arguments for `regen sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// The fixture file to update.
    pub file: PathBuf,

    /// Apply a substitution to the GENERATED-BY command before it runs.
    /// PATTERN is a regular expression; may be repeated.
    #[arg(
        long = "subst",
        num_args = 2,
        value_names = ["PATTERN", "REPLACEMENT"],
        action = ArgAction::Append
    )]
    pub subst: Vec<String>,

    /// Run the generator and report, but never rewrite the file.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the outcome as a JSON object instead of plain text.
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let substitutions: Vec<Substitution> = self
            .subst
            .chunks_exact(2)
            .map(|pair| Substitution::new(&pair[0], pair[1].clone()))
            .collect::<Result<_, _>>()?;

        let outcome = synchronize(&self.file, &substitutions, self.dry_run)
            .with_context(|| format!("sync failed for '{}'", self.file.display()))?;

        if self.json {
            println!("{}", serde_json::to_string(&outcome)?);
            return Ok(());
        }

        match outcome {
            // Nothing to do is silent: no directive, or generator output
            // already matches the stored hash.
            SyncOutcome::Unchanged => {}
            SyncOutcome::Updated { path } => println!("updated file: {}", path.display()),
            SyncOutcome::WouldUpdate { path } => {
                println!("[dry-run] would update: {}", path.display());
            }
        }
        Ok(())
    }
}
