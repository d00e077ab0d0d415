//! Shared testing utilities for shield-vote CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ENV_OVERRIDES: [&str; 3] =
    ["SHIELD_VOTE_RPC_URL", "SHIELD_VOTE_CONTRACT_ADDRESS", "SHIELD_VOTE_CHAIN_ID"];

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Directory the CLI runs in.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled binary within the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("shield-vote").expect("Failed to locate binary");
        cmd.current_dir(&self.work_dir);
        for name in ENV_OVERRIDES {
            cmd.env_remove(name);
        }
        cmd
    }

    /// Write `shield-vote.toml` into the work directory.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.work_dir.join("shield-vote.toml");
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Write an arbitrary file relative to the work directory.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Default journal location.
    pub fn journal_path(&self) -> PathBuf {
        self.work_dir.join(".shield-vote/votes.jsonl")
    }

    /// Lines currently in the default journal (empty when absent).
    pub fn journal_lines(&self) -> Vec<String> {
        fs::read_to_string(self.journal_path())
            .map(|content| content.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Cast a vote with typed confirmation.
    pub fn vote(&self, id: &str, voter: &str, choice: &str) -> assert_cmd::assert::Assert {
        self.cli()
            .args(["vote", id, "--voter", voter, "--choice", choice, "--confirm", id])
            .assert()
    }
}
