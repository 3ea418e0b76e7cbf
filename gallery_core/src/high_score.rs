//! Persisted high score
//!
//! `HighScore` is loaded once from an injected store and written through on
//! every improvement. Persistence is best-effort: a failed write is logged and
//! remembered so `flush` can retry it.

use log::{info, warn};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("stored high score is corrupt: {0}")]
    Corrupt(String),
}

/// Durable key holding the high score
pub trait HighScoreStore {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<i32>, StoreError>;
    fn save(&mut self, value: i32) -> Result<(), StoreError>;
}

/// In-memory store, counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: Option<i32>,
    pub writes: u32,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: i32) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<i32>, StoreError> {
        Ok(self.value)
    }

    fn save(&mut self, value: i32) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "writes disabled",
            )));
        }
        self.value = Some(value);
        self.writes += 1;
        Ok(())
    }
}

#[derive(Debug)]
pub struct HighScore<S: HighScoreStore> {
    value: i32,
    dirty: bool, // Last write failed
    store: S,
}

impl<S: HighScoreStore> HighScore<S> {
    /// Read the stored value once; absent or unreadable loads as 0
    pub fn load(store: S) -> Self {
        let value = match store.load() {
            Ok(value) => value.unwrap_or(0),
            Err(err) => {
                warn!("High score unreadable, starting from 0: {err}");
                0
            }
        };
        Self {
            value,
            dirty: false,
            store,
        }
    }

    pub fn get(&self) -> i32 {
        self.value
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record `score` if it beats the current high score. Returns true on a new record.
    pub fn submit(&mut self, score: i32) -> bool {
        if score <= self.value {
            return false;
        }
        info!("New high score: {score} (was {})", self.value);
        self.value = score;
        self.persist();
        true
    }

    /// Retry a failed write. No-op when the store is up to date.
    pub fn flush(&mut self) {
        if self.dirty {
            self.persist();
        }
    }

    fn persist(&mut self) {
        match self.store.save(self.value) {
            Ok(()) => self.dirty = false,
            Err(err) => {
                warn!("Failed to persist high score {}: {err}", self.value);
                self.dirty = true;
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
