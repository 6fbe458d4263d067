//! Operator edit trail
//!
//! Appends one line per vocabulary change. Transcripts and resolutions are
//! not recorded here.

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const EDIT_LOG_FILE: &str = "vocabulary_edits.log";

/// Default audit directory (respecting XDG)
pub fn default_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("railtalk")
}

/// Record an atomic command upsert
pub fn log_vocabulary_edit(dir: &Path, phrase: &str, label: i32) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(EDIT_LOG_FILE))?;

    writeln!(
        file,
        "[{}] VOCAB UPSERT '{}' -> {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        phrase,
        label
    )?;
    Ok(())
}
