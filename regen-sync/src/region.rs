//! Generated-region synchronizer.
//!
//! Finds the first `GENERATED-BY` directive in a document, runs its command
//! (after substitutions), and replaces the region between the directive and
//! the next section boundary (or EOF) with the command's stdout. A
//! `GENERATED-HASH` record written after the directive gates the rewrite:
//! when the freshly generated output hashes to the stored digest the file is
//! not touched at all, so repeated runs with a stable generator never dirty
//! mtimes or produce spurious diffs.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use regen_core::{markers, Document};

use crate::command::{run_shell, Substitution};
use crate::error::SyncError;

/// Outcome of one synchronization pass over one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// No directive in the document, or the generator output hashed to the
    /// stored digest. Nothing to do; the file was not rewritten.
    Unchanged,
    /// The generated region was replaced and the document saved.
    Updated { path: PathBuf },
    /// Dry-run: the generator ran and its output differs, but no write was
    /// performed.
    WouldUpdate { path: PathBuf },
}

/// Run the document's `GENERATED-BY` command and update the generated
/// region with its output.
///
/// Only the first directive is processed per invocation; callers needing
/// exhaustive processing re-invoke. A document with no directive is a
/// defined nothing-to-do outcome, not an error.
pub fn synchronize(
    path: &Path,
    substitutions: &[Substitution],
    dry_run: bool,
) -> Result<SyncOutcome, SyncError> {
    let mut doc = Document::load(path)?;

    let Some((directive_idx, directive)) = doc
        .lines()
        .iter()
        .enumerate()
        .find_map(|(i, l)| markers::directive(l).map(|d| (i, d)))
    else {
        tracing::debug!("no GENERATED-BY directive in {}", path.display());
        return Ok(SyncOutcome::Unchanged);
    };
    let prefix = directive.prefix.to_string();
    let template = directive.command.to_string();

    let cmd = Substitution::apply_all(substitutions, &template);
    tracing::debug!("running generator: {cmd}");
    let output = run_shell(&cmd)?;
    if !output.success {
        return Err(SyncError::GenerationFailed {
            command: cmd,
            stderr: output.stderr,
        });
    }

    let digest = {
        let mut h = Sha256::new();
        h.update(output.stdout.as_bytes());
        hex::encode(h.finalize())
    };

    // An existing hash record sits immediately after the directive and is
    // consumed by the replacement span.
    let mut content_start = directive_idx + 1;
    let mut stored_digest = None;
    if let Some(line) = doc.lines().get(content_start) {
        if let Some(d) = markers::hash_record(line) {
            stored_digest = Some(d.to_string());
            content_start += 1;
        }
    }

    if stored_digest.as_deref() == Some(digest.as_str()) {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(SyncOutcome::Unchanged);
    }

    if dry_run {
        tracing::info!("[dry-run] would update: {}", path.display());
        return Ok(SyncOutcome::WouldUpdate {
            path: path.to_path_buf(),
        });
    }

    let span_end = doc.lines()[content_start..]
        .iter()
        .position(|l| markers::section_name(l).is_some())
        .map_or(doc.lines().len(), |off| content_start + off);

    // A trailing terminator on the final content line keeps a following
    // section boundary off the generated text.
    let mut replacement = vec![format!("{prefix} GENERATED-HASH: {digest}\n")];
    replacement.extend(output.stdout.split_inclusive('\n').map(str::to_owned));
    if let Some(last) = replacement.last_mut() {
        if !last.ends_with('\n') {
            last.push('\n');
        }
    }

    doc.replace_span(directive_idx + 1..span_end, replacement);
    doc.save()?;
    tracing::info!("updated: {}", path.display());
    Ok(SyncOutcome::Updated {
        path: path.to_path_buf(),
    })
}
