//! Durable records: the high score and per-game statistics.
//!
//! Both stores treat a missing or unreadable file as "no record yet" and log a
//! warning for corrupt contents. Writes replace the whole file atomically: the
//! new contents go to a temporary file in the same directory, which is then
//! renamed over the record, so a reader sees either the old or the new file.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

pub mod high_score;
pub mod stats;

pub use snake_tui_core as core;

pub use high_score::FileHighScoreStore;
pub use stats::{GameStats, StatsStore};

/// Replace `path` with `contents` in one rename.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
