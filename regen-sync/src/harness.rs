//! Glue between a failing verify-mode compiler invocation and the splice
//! propagator.
//!
//! The diagnostic-analysis routine that decides what expectation text to
//! write is an external collaborator, modeled by [`ExpectationRepairer`].
//! This module extracts the at-most-one additional expectation prefix from
//! the invocation, hands the captured stderr to the repairer, and feeds the
//! files it rewrote through [`propagate`] so edits to materialized slices
//! land back in the flattened document.

use std::path::{Path, PathBuf};

use crate::error::SyncError;
use crate::splice::{propagate, SpliceOutcome};

/// Flag marking an invocation as a verify-mode run worth repairing.
pub const VERIFY_FLAG: &str = "-verify";

/// Flag carrying an additional expectation prefix; at most one is supported.
pub const ADDITIONAL_PREFIX_FLAG: &str = "-verify-additional-prefix";

/// The external routine that rewrites expectation comments from a failing
/// invocation's stderr. Returns the files it rewrote, or an error message.
pub trait ExpectationRepairer {
    fn repair(&self, stderr: &str, additional_prefix: &str) -> Result<Vec<PathBuf>, String>;
}

/// Extract the additional expectation prefix from invocation args.
///
/// - zero occurrences → `Ok(Some(""))`
/// - one occurrence with a value → `Ok(Some(value))`
/// - the flag as the final arg, with no value → `Ok(None)`: the invocation
///   is malformed and the repair is skipped entirely
/// - two or more occurrences → [`SyncError::AmbiguousAdditionalPrefix`]
pub fn additional_prefix(args: &[String]) -> Result<Option<&str>, SyncError> {
    let mut prefix: Option<&str> = None;
    for (i, arg) in args.iter().enumerate() {
        if arg == ADDITIONAL_PREFIX_FLAG {
            let Some(value) = args.get(i + 1) else {
                return Ok(None);
            };
            if prefix.is_some() {
                return Err(SyncError::AmbiguousAdditionalPrefix);
            }
            prefix = Some(value);
        }
    }
    Ok(Some(prefix.unwrap_or("")))
}

/// Repair expectations for one failed invocation and propagate the rewritten
/// files back into `document`.
///
/// Returns `Ok(None)` when the invocation is not applicable (no `-verify`
/// flag, or a dangling prefix flag); no file is modified in that case.
pub fn repair_and_propagate(
    document: &Path,
    invocation_args: &[String],
    stderr: &str,
    commands: &[String],
    repairer: &dyn ExpectationRepairer,
) -> Result<Option<Vec<SpliceOutcome>>, SyncError> {
    if !invocation_args.iter().any(|a| a == VERIFY_FLAG) {
        return Ok(None);
    }
    let Some(prefix) = additional_prefix(invocation_args)? else {
        return Ok(None);
    };

    let edited = repairer
        .repair(stderr, prefix)
        .map_err(|message| SyncError::RepairFailed { message })?;
    propagate(document, &edited, commands).map(Some)
}
