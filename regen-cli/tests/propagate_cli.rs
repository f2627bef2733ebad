//! End-to-end tests for `regen propagate`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn regen() -> Command {
    Command::cargo_bin("regen").expect("regen binary")
}

/// Flattened document with two sections, plus its materialized split dir.
fn split_fixture() -> (TempDir, PathBuf, PathBuf, String) {
    let tmp = TempDir::new().unwrap();
    let doc = tmp.path().join("t.txt");
    fs::write(&doc, "hdr\n//--- a.txt\noldA\n//--- b.txt\nB\n").unwrap();
    let split_dir = tmp.path().join("split");
    fs::create_dir_all(&split_dir).unwrap();
    fs::write(split_dir.join("a.txt"), "oldA\n").unwrap();
    fs::write(split_dir.join("b.txt"), "B\n").unwrap();
    let command = format!("split-file {} {}", doc.display(), split_dir.display());
    (tmp, doc, split_dir, command)
}

#[test]
fn propagate_splices_and_reports_slice() {
    let (_tmp, doc, split_dir, command) = split_fixture();
    let edited = split_dir.join("a.txt");
    fs::write(&edited, "X\n").unwrap();

    regen()
        .arg("propagate")
        .arg(&doc)
        .arg("--edited")
        .arg(&edited)
        .args(["--command", &command])
        .assert()
        .success()
        .stdout(predicate::str::contains("updated slice a.txt in"));

    assert_eq!(
        fs::read_to_string(&doc).unwrap(),
        "hdr\n//--- a.txt\nX\n//--- b.txt\nB\n"
    );
}

#[test]
fn without_split_invocation_paths_pass_through() {
    let (_tmp, doc, split_dir, _command) = split_fixture();
    let edited = split_dir.join("a.txt");

    regen()
        .arg("propagate")
        .arg(&doc)
        .arg("--edited")
        .arg(&edited)
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("updated").not());
    assert_eq!(
        fs::read_to_string(&doc).unwrap(),
        "hdr\n//--- a.txt\noldA\n//--- b.txt\nB\n"
    );
}

#[test]
fn json_flag_emits_structured_outcomes() {
    let (_tmp, doc, split_dir, command) = split_fixture();
    let edited = split_dir.join("b.txt");
    fs::write(&edited, "newB\n").unwrap();

    regen()
        .arg("propagate")
        .arg(&doc)
        .arg("--edited")
        .arg(&edited)
        .args(["--command", &command])
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""result":"spliced""#))
        .stdout(predicate::str::contains(r#""section":"b.txt""#));
}
