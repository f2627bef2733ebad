//! Shell execution and directive-command substitutions.
//!
//! This is the only module that talks to the operating system's shell. The
//! generation command's own syntax (pipes, redirections) is part of the
//! external contract, so the command runs under `sh -c` (`cmd /C` on
//! Windows) rather than being tokenized here.

use std::process::Command;

use regex::Regex;

use crate::error::{io_err, SyncError};

/// One pattern → replacement rewrite applied to a directive's command text.
///
/// Substitutions are applied in order as successive regex replacements, so a
/// later pattern sees the result of earlier ones.
#[derive(Debug, Clone)]
pub struct Substitution {
    pattern: Regex,
    replacement: String,
}

impl Substitution {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, SyncError> {
        let compiled = Regex::new(pattern).map_err(|source| SyncError::BadSubstitution {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: compiled,
            replacement: replacement.into(),
        })
    }

    /// Apply `substitutions` to `command`, in order.
    pub fn apply_all(substitutions: &[Substitution], command: &str) -> String {
        let mut cmd = command.to_string();
        for sub in substitutions {
            cmd = sub
                .pattern
                .replace_all(&cmd, sub.replacement.as_str())
                .into_owned();
        }
        cmd
    }
}

/// Captured result of one shell invocation.
#[derive(Debug, Clone)]
pub struct ShellOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Run `command` under the platform shell, blocking until it exits, and
/// capture stdout, stderr, and the exit status.
///
/// No timeout is imposed; a hung command hangs the whole pass.
pub fn run_shell(command: &str) -> Result<ShellOutput, SyncError> {
    #[cfg(not(windows))]
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .output()
        .map_err(|e| io_err(command, e))?;
    #[cfg(windows)]
    let output = Command::new("cmd")
        .arg("/C")
        .arg(command)
        .output()
        .map_err(|e| io_err(command, e))?;

    Ok(ShellOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutions_apply_in_order() {
        let subs = vec![
            Substitution::new("%t", "/tmp/case").unwrap(),
            Substitution::new("/tmp/case/out", "/tmp/case/final").unwrap(),
        ];
        let cmd = Substitution::apply_all(&subs, "gen %t/out > %t/out.log");
        assert_eq!(cmd, "gen /tmp/case/final > /tmp/case/final.log");
    }

    #[test]
    fn substitution_patterns_are_regexes() {
        let subs = vec![Substitution::new(r"%\{dir\}", "/work").unwrap()];
        assert_eq!(Substitution::apply_all(&subs, "ls %{dir}"), "ls /work");
    }

    #[test]
    fn bad_pattern_is_reported() {
        let err = Substitution::new("(", "x").unwrap_err();
        assert!(matches!(err, SyncError::BadSubstitution { .. }));
    }

    #[test]
    fn run_shell_captures_stdout() {
        let out = run_shell("echo hi").unwrap();
        assert!(out.success);
        assert_eq!(out.stdout, "hi\n");
    }

    #[test]
    #[cfg(unix)]
    fn run_shell_captures_stderr_and_failure() {
        let out = run_shell("echo boom >&2; exit 1").unwrap();
        assert!(!out.success);
        assert_eq!(out.stderr, "boom\n");
    }
}
