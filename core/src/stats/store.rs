use alloc::string::String;
use thiserror::Error;

use super::StatsBook;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Stats storage unavailable: {0}")]
    Unavailable(String),
    #[error("Stored stats are corrupt: {0}")]
    Corrupt(String),
    #[error("Could not write stats: {0}")]
    Write(String),
}

/// Where a [`StatsRecorder`](super::StatsRecorder) keeps its book between calls.
pub trait StatsStore {
    /// `Ok(None)` when nothing was stored yet.
    fn load(&self) -> Result<Option<StatsBook>, StoreError>;

    fn save(&mut self, book: &StatsBook) -> Result<(), StoreError>;

    fn clear(&mut self) -> Result<(), StoreError>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    book: Option<StatsBook>,
}

impl MemoryStore {
    pub fn book(&self) -> Option<&StatsBook> {
        self.book.as_ref()
    }
}

impl StatsStore for MemoryStore {
    fn load(&self) -> Result<Option<StatsBook>, StoreError> {
        Ok(self.book.clone())
    }

    fn save(&mut self, book: &StatsBook) -> Result<(), StoreError> {
        self.book = Some(book.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.book = None;
        Ok(())
    }
}
