//! Shared helpers for integration tests
#![allow(dead_code)]

use railtalk::{Resolution, Resolver, VocabularyStore};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Transcripts the default vocabulary must reject
pub const GARBAGE: &[&str] = &[
    "asdfghjkl",
    "!!! @@@ ###",
    "1234567890",
    "совершенно случайный текст без связи",
    "extremely long string that doesn't mean anything to the system at all but might cause buffer issues if we were in C but we are in Rust so it's just a long string",
    "",
    " ",
];

pub fn default_store() -> VocabularyStore {
    VocabularyStore::default()
}

pub fn resolve_at(store: &VocabularyStore, transcript: &str, threshold: u8) -> Resolution {
    Resolver::default().resolve(store, transcript, threshold)
}

/// Isolated environment for running the binary
pub struct TestContext {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.json");
        Self {
            temp_dir,
            config_path,
        }
    }

    /// Command for the railtalk binary with config and XDG dirs inside the temp dir
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_railtalk"));
        cmd.env("XDG_CONFIG_HOME", self.temp_dir.path().join("config"))
            .env("RUST_LOG", "warn")
            .arg("--config")
            .arg(&self.config_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}
