//! Common test utilities for minishell integration tests

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// A scratch directory with a `minishell` command rooted in it.
///
/// HOME points into the directory too, so no real startup file is read
/// even when a test leaves out `--norc`.
pub struct Session {
    pub dir: TempDir,
}

impl Session {
    pub fn new() -> Self {
        Session {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `minishell` with no startup file, run inside the scratch directory
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("minishell").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env_remove("MINISHELL_PROMPT")
            .env_remove("MINISHELL_TRACE");
        cmd
    }

    /// Interactive session reading `input` line by line
    pub fn script(&self, input: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("--norc").write_stdin(input.to_string());
        cmd
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path().join(name)).unwrap()
    }

    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.path().join(name), content).unwrap();
    }
}

/// Run `input` in a fresh session and return its stdout
pub fn stdout_of(input: &str) -> String {
    let session = Session::new();
    let output = session.script(input).output().unwrap();
    String::from_utf8(output.stdout).unwrap()
}
