//! Pure matchers for the three fixture marker lines.
//!
//! Each matcher takes one line (terminator included is fine) and returns an
//! optional capture; no state, no I/O. The directive and hash matchers are
//! compile-once regex constants; the section-boundary matcher is a manual
//! prefix walk with a cheap length rejection.
//!
//! All three tolerate either a two-character line-comment prefix (`//`, `--`)
//! or a one-character one (`#`, `;`), so the engine stays agnostic to the
//! commenting convention of the fixture's host syntax.

use once_cell::sync::Lazy;
use regex::Regex;

static DIRECTIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(//|--|#|;)\s*GENERATED-BY:\s*(.*)$").expect("directive pattern"));

static HASH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(//|--|#|;)\s*GENERATED-HASH:\s*([0-9a-f]{64})$").expect("hash pattern")
});

/// A matched generation directive: the comment prefix it was written with,
/// and the command template to the right of the marker.
///
/// The prefix is kept so the hash record can be written back in the same
/// comment convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    pub prefix: &'a str,
    pub command: &'a str,
}

/// Match `<prefix> GENERATED-BY: <command>`, returning the prefix and the
/// trimmed command text.
pub fn directive(line: &str) -> Option<Directive<'_>> {
    let caps = DIRECTIVE_RE.captures(line.trim())?;
    Some(Directive {
        prefix: caps.get(1)?.as_str(),
        command: caps.get(2)?.as_str().trim(),
    })
}

/// Match `<prefix> GENERATED-HASH: <digest>`, returning the 64-character
/// lowercase hex digest.
pub fn hash_record(line: &str) -> Option<&str> {
    let caps = HASH_RE.captures(line.trim())?;
    Some(caps.get(2)?.as_str())
}

/// Match a section-boundary header and return the section path.
///
/// The boundary is a comment prefix followed immediately by the literal
/// `--- ` and a path (`//--- dir/file.txt`), or — for relocation headers
/// emitted with no comment prefix at all — the delimiter at the very start
/// of the line. The path capture is right-trimmed of its terminator.
pub fn section_name(line: &str) -> Option<&str> {
    // A matching line is at least `X--- p` plus terminator.
    if line.len() < 6 {
        return None;
    }
    let rest = if let Some(r) = line.strip_prefix("//") {
        r
    } else if line.starts_with("--- ") {
        line
    } else {
        let mut chars = line.chars();
        chars.next();
        chars.as_str()
    };
    let path = rest.strip_prefix("--- ")?.trim_end();
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}
