//! Section-splice propagator.
//!
//! A flattened fixture document holds named sections (`//--- path` headers)
//! that an external `split-file` step materializes into standalone files.
//! When one of those materialized files is edited, [`propagate`] splices the
//! edit back over the matching section of the flattened document, leaving
//! every other section and all surrounding lines byte-identical. The
//! flattened document is the single source of truth and is rewritten in
//! place; the edited file is left as-is.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use regen_core::{markers, Document};

use crate::error::{io_err, SyncError};

/// Name of the external tool whose invocation ties a document to the
/// directory its sections were materialized into.
pub const SPLIT_TOOL: &str = "split-file";

/// Per-file outcome of a [`propagate`] call, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SpliceOutcome {
    /// The edited file matched a section and was spliced into the document.
    Spliced { section: String, document: PathBuf },
    /// The edited file is not a section of this document; passed through.
    Passthrough { path: PathBuf },
}

impl fmt::Display for SpliceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpliceOutcome::Spliced { section, document } => {
                write!(f, "slice {section} in {}", document.display())
            }
            SpliceOutcome::Passthrough { path } => write!(f, "{}", path.display()),
        }
    }
}

/// A section boundary resolved against a specific document.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SectionTarget {
    boundary_idx: usize,
    name: String,
}

/// Splice each edited file that belongs to `document` back over its section.
///
/// The target directory is recovered from `commands` (the shell commands the
/// harness was about to run) by locating a [`SPLIT_TOOL`] invocation whose
/// source argument is `document`; without one, every edited file passes
/// through untouched. Edited files that do not resolve to a section of this
/// document also pass through — not every rewritten file is a slice.
pub fn propagate(
    document: &Path,
    edited_files: &[PathBuf],
    commands: &[String],
) -> Result<Vec<SpliceOutcome>, SyncError> {
    let Some(target_dir) = split_target_dir(commands, document) else {
        tracing::debug!("no split-file invocation for {}", document.display());
        return Ok(edited_files
            .iter()
            .map(|p| SpliceOutcome::Passthrough { path: p.clone() })
            .collect());
    };

    let mut results = Vec::new();
    for edited in edited_files {
        // Reload per splice so a later splice sees an earlier one's write.
        let mut doc = Document::load(document)?;
        match find_section(&doc, &target_dir, edited) {
            Some(target) => {
                splice(&mut doc, &target, edited)?;
                tracing::info!("spliced slice {} in {}", target.name, document.display());
                results.push(SpliceOutcome::Spliced {
                    section: target.name,
                    document: document.to_path_buf(),
                });
            }
            None => results.push(SpliceOutcome::Passthrough {
                path: edited.clone(),
            }),
        }
    }
    Ok(results)
}

/// Find the destination directory of the `split-file` invocation whose
/// source argument resolves to `document`.
///
/// An invocation with too few arguments yields no target directory and is
/// skipped rather than reported.
fn split_target_dir(commands: &[String], document: &Path) -> Option<PathBuf> {
    for cmd in commands {
        let tokens = tokenize(cmd);
        let Some(pos) = tokens.iter().position(|t| t == SPLIT_TOOL) else {
            continue;
        };
        let invocation = &tokens[pos..];
        if invocation.len() < 3 {
            continue;
        }
        let source = unquote(invocation[1].trim());
        if !same_file(Path::new(source), document) {
            continue;
        }
        return Some(PathBuf::from(unquote(invocation[2].trim())));
    }
    None
}

fn find_section(doc: &Document, target_dir: &Path, edited: &Path) -> Option<SectionTarget> {
    doc.lines().iter().enumerate().find_map(|(i, line)| {
        let name = markers::section_name(line)?;
        same_file(&target_dir.join(name), edited).then(|| SectionTarget {
            boundary_idx: i,
            name: name.to_string(),
        })
    })
}

/// Overwrite the span `(boundary, next boundary or EOF)` with the edited
/// file's full contents and save the document in place.
fn splice(doc: &mut Document, target: &SectionTarget, edited: &Path) -> Result<(), SyncError> {
    let start = target.boundary_idx + 1;
    let end = doc.lines()[start..]
        .iter()
        .position(|l| markers::section_name(l).is_some())
        .map_or(doc.lines().len(), |off| start + off);

    let contents = std::fs::read_to_string(edited).map_err(|e| io_err(edited, e))?;
    let new_lines = contents.split_inclusive('\n').map(str::to_owned).collect();
    doc.replace_span(start..end, new_lines);
    doc.save()?;
    Ok(())
}

/// Whitespace tokenization that respects single and double quotes but treats
/// backslash as an ordinary character, so Windows-style section paths
/// survive. Quotes are kept in the token and stripped by [`unquote`] when
/// the token is consumed.
fn tokenize(command: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    for c in command.chars() {
        match quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    quote = None;
                }
            }
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
                current.push(c);
            }
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn unquote(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() > 1
        && bytes[0] == bytes[bytes.len() - 1]
        && (bytes[0] == b'"' || bytes[0] == b'\'')
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Filesystem identity, not string equality: both paths are canonicalized
/// so relative paths and symlinks compare correctly. Either path failing to
/// resolve is a non-match.
fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
