//! Line-oriented document model with byte-exact round-tripping.
//!
//! A [`Document`] is an ordered sequence of lines, each line keeping its own
//! terminator. Concatenating [`Document::lines`] reproduces the file
//! byte-for-byte, so any span not explicitly replaced survives a save
//! unchanged — no normalization of line endings or trailing whitespace.
//!
//! Saves use the same atomic `.tmp` + rename protocol as the rest of the
//! workspace: write to `<path>.regen.tmp`, rename over the target, remove
//! the tmp file if the rename fails.

use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::error::{io_err, DocumentError};

/// An in-memory copy of one text file, split into terminator-keeping lines.
///
/// Documents are loaded fresh per pass and discarded after [`Document::save`];
/// nothing is cached across passes.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    lines: Vec<String>,
}

impl Document {
    /// Read the file at `path` into a line sequence.
    ///
    /// Each line keeps its `\n` (and any preceding `\r`); a final line with
    /// no terminator is kept as-is.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, DocumentError> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        let lines = contents.split_inclusive('\n').map(str::to_owned).collect();
        Ok(Self { path, lines })
    }

    /// The path this document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All lines, terminators included.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace the half-open line range `span` with `replacement`.
    ///
    /// Lines outside `span` are untouched. `span.end` may equal the line
    /// count (replace through end of document).
    pub fn replace_span(&mut self, span: Range<usize>, replacement: Vec<String>) {
        self.lines.splice(span, replacement);
    }

    /// Write all lines back to the document's path, atomically.
    ///
    /// Writes to `<path>.regen.tmp` then renames; a crash mid-write can
    /// never leave a mixture of old and new bytes at the target path.
    /// This is the only operation in the crate that mutates storage.
    pub fn save(&self) -> Result<(), DocumentError> {
        let tmp = PathBuf::from(format!("{}.regen.tmp", self.path.display()));
        let contents = self.lines.concat();
        std::fs::write(&tmp, &contents).map_err(|e| io_err(&tmp, e))?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(&self.path, e));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn doc_with(content: &str) -> (TempDir, Document) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fixture.txt");
        fs::write(&path, content).unwrap();
        let doc = Document::load(&path).unwrap();
        (tmp, doc)
    }

    #[test]
    fn load_save_round_trips_bytes() {
        let (_tmp, doc) = doc_with("a\nb\r\nc");
        assert_eq!(doc.lines(), &["a\n", "b\r\n", "c"]);
        doc.save().unwrap();
        assert_eq!(fs::read_to_string(doc.path()).unwrap(), "a\nb\r\nc");
    }

    #[test]
    fn empty_file_has_no_lines() {
        let (_tmp, doc) = doc_with("");
        assert!(doc.lines().is_empty());
    }

    #[test]
    fn missing_trailing_newline_is_preserved() {
        let (_tmp, doc) = doc_with("one\ntwo");
        doc.save().unwrap();
        assert_eq!(fs::read_to_string(doc.path()).unwrap(), "one\ntwo");
    }

    #[test]
    fn replace_span_leaves_surrounding_lines_intact() {
        let (_tmp, mut doc) = doc_with("a\nb\nc\nd\n");
        doc.replace_span(1..3, vec!["X\n".to_string()]);
        doc.save().unwrap();
        assert_eq!(fs::read_to_string(doc.path()).unwrap(), "a\nX\nd\n");
    }

    #[test]
    fn replace_span_through_end_of_document() {
        let (_tmp, mut doc) = doc_with("a\nb\n");
        let end = doc.lines().len();
        doc.replace_span(1..end, vec!["tail\n".to_string()]);
        doc.save().unwrap();
        assert_eq!(fs::read_to_string(doc.path()).unwrap(), "a\ntail\n");
    }

    #[test]
    fn tmp_file_removed_after_save() {
        let (_tmp, doc) = doc_with("x\n");
        doc.save().unwrap();
        let tmp_path = PathBuf::from(format!("{}.regen.tmp", doc.path().display()));
        assert!(!tmp_path.exists(), ".regen.tmp must be cleaned up");
    }

    #[test]
    #[cfg(unix)]
    fn failed_save_leaves_original_intact() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let dir = root.path().join("readonly");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("fixture.txt");
        fs::write(&path, "original\n").unwrap();
        let mut doc = Document::load(&path).unwrap();
        doc.replace_span(0..1, vec!["new\n".to_string()]);

        let mut perms = fs::metadata(&dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&dir, perms).unwrap();

        doc.save().expect_err("save should fail on readonly dir");
        let mut perms = fs::metadata(&dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&dir, perms).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "original\n");
    }
}
