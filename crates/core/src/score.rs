//! Score keeping with a write-through high score.
//!
//! The durable high score is read once when a session starts. From then on the
//! in-memory value is authoritative and every improvement is written straight
//! through to the store. A failed write is logged and retried on the next
//! improvement or at game over; gameplay never waits on storage.

use log::warn;

use crate::error::PersistError;

/// Durable home of the high score.
pub trait HighScoreStore {
    /// Current durable value; 0 when missing or unreadable.
    fn load(&mut self) -> u32;

    /// Overwrite the durable value.
    fn save(&mut self, value: u32) -> Result<(), PersistError>;
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for &mut T {
    fn load(&mut self) -> u32 {
        (**self).load()
    }

    fn save(&mut self, value: u32) -> Result<(), PersistError> {
        (**self).save(value)
    }
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for Box<T> {
    fn load(&mut self) -> u32 {
        (**self).load()
    }

    fn save(&mut self, value: u32) -> Result<(), PersistError> {
        (**self).save(value)
    }
}

/// In-memory store (tests, headless runs).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    value: Option<u32>,
    /// Successful writes so far
    pub writes: u32,
    /// Make every `save` fail
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> u32 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, value: u32) -> Result<(), PersistError> {
        if self.fail_writes {
            return Err(PersistError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "write refused",
            )));
        }
        self.value = Some(value);
        self.writes += 1;
        Ok(())
    }
}

/// Session score plus the in-memory high score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreKeeper {
    score: u32,
    high_score: u32,
    /// Last value known to be durable
    persisted: u32,
}

impl ScoreKeeper {
    /// Start a session: the only read of the durable record.
    pub fn load(store: &mut dyn HighScoreStore) -> Self {
        let high_score = store.load();
        Self {
            score: 0,
            high_score,
            persisted: high_score,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// True when the in-memory high score is ahead of the durable one
    pub fn is_dirty(&self) -> bool {
        self.high_score > self.persisted
    }

    /// Add points; returns `true` when the high score improved.
    pub fn add(&mut self, points: u32, store: &mut dyn HighScoreStore) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score <= self.high_score {
            return false;
        }
        self.high_score = self.score;
        self.write_through(store);
        true
    }

    /// Write the high score if an earlier write did not land.
    pub fn flush(&mut self, store: &mut dyn HighScoreStore) {
        if self.is_dirty() {
            self.write_through(store);
        }
    }

    fn write_through(&mut self, store: &mut dyn HighScoreStore) {
        match store.save(self.high_score) {
            Ok(()) => self.persisted = self.high_score,
            Err(err) => warn!("failed to persist high score {}: {}", self.high_score, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_reads_store_once() {
        let mut store = MemoryStore::with_value(7);
        let keeper = ScoreKeeper::load(&mut store);
        assert_eq!(keeper.score(), 0);
        assert_eq!(keeper.high_score(), 7);
        assert!(!keeper.is_dirty());
    }

    #[test]
    fn test_add_below_high_score_does_not_write() {
        let mut store = MemoryStore::with_value(5);
        let mut keeper = ScoreKeeper::load(&mut store);
        assert!(!keeper.add(3, &mut store));
        assert!(!keeper.add(2, &mut store));
        assert_eq!(store.writes, 0);
        assert_eq!(store.value(), Some(5));
    }

    #[test]
    fn test_write_through_on_every_improvement() {
        let mut store = MemoryStore::with_value(1);
        let mut keeper = ScoreKeeper::load(&mut store);
        keeper.add(1, &mut store);
        assert_eq!(store.writes, 0);
        assert!(keeper.add(1, &mut store));
        assert_eq!(store.value(), Some(2));
        assert!(keeper.add(3, &mut store));
        assert_eq!(store.value(), Some(5));
        assert_eq!(store.writes, 2);
    }

    #[test]
    fn test_failed_write_is_retried_by_flush() {
        let mut store = MemoryStore::new();
        let mut keeper = ScoreKeeper::load(&mut store);
        store.fail_writes = true;
        assert!(keeper.add(4, &mut store));
        assert_eq!(keeper.high_score(), 4);
        assert!(keeper.is_dirty());
        assert_eq!(store.value(), None);

        store.fail_writes = false;
        keeper.flush(&mut store);
        assert!(!keeper.is_dirty());
        assert_eq!(store.value(), Some(4));

        // Nothing to do the second time.
        keeper.flush(&mut store);
        assert_eq!(store.writes, 1);
    }
}
