//! High score kept as a single decimal number in a text file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

use crate::core::{HighScoreStore, PersistError};
use crate::write_atomic;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&mut self) -> u32 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return 0,
            Err(err) => {
                warn!("cannot read high score {}: {}", self.path.display(), err);
                return 0;
            }
        };
        match text.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "corrupt high score record in {}, starting from 0",
                    self.path.display()
                );
                0
            }
        }
    }

    fn save(&mut self, value: u32) -> Result<(), PersistError> {
        write_atomic(&self.path, value.to_string().as_bytes())?;
        Ok(())
    }
}
