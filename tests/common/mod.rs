#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use assert_cmd::Command;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated home directory for config and snapshot files.
pub fn setup_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// CLI invocation pinned to `home`, with colors off.
pub fn cli(home: &PathBuf) -> Command {
    let mut cmd = Command::cargo_bin("spending_tracker_cli").expect("binary exists");
    cmd.env("SPENDING_TRACKER_HOME", home)
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

pub fn snapshot_path(home: &PathBuf) -> PathBuf {
    home.join("spendingTrackerData.json")
}
