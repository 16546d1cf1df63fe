//! Shared helpers for CLI specs

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

/// Scenario with two overloads of `A` emitted once each
pub const OVERLOADED_SCRIPT: &str = r#"
[[class]]
name = "Emitter"
signal = [
    { name = "A", params = ["string"] },
    { name = "A", params = ["int", "string"] },
]

[[emit]]
signal = "A(string)"
args = ["x"]

[[emit]]
signal = "A(int,string)"
args = [5, "y"]
"#;

/// Scratch directory holding scenario files
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str, contents: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    pub fn sigrec(&self) -> CliBuilder {
        let mut builder = sigrec();
        builder.cmd.current_dir(self.path());
        builder
    }
}

/// Invoke the sigrec binary
pub fn sigrec() -> CliBuilder {
    let mut cmd = Command::cargo_bin("sigrec").unwrap();
    cmd.env_remove("RUST_LOG");
    CliBuilder { cmd }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        RunAssert(self.cmd.assert().success())
    }

    pub fn fails(mut self) -> RunAssert {
        RunAssert(self.cmd.assert().failure())
    }
}

pub struct RunAssert(assert_cmd::assert::Assert);

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.0.get_output().stdout).to_string()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.0.get_output().stderr).to_string()
    }

    /// Compare stdout exactly, with a readable diff on mismatch
    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        RunAssert(self.0.stdout(predicate::str::contains(expected)))
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        RunAssert(self.0.stdout(predicate::str::contains(unexpected).not()))
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        RunAssert(self.0.stderr(predicate::str::contains(expected)))
    }
}
