//! Bounded lookup history
//!
//! Keeps the most recent lookups in a small newest-first list persisted as
//! a JSON file. The list is owned by whichever layer drives the lookups;
//! the tracking core itself never touches it.

pub mod models;
pub mod storage;

pub use models::HistoryEntry;
pub use storage::{HistoryError, HistoryStorage, HISTORY_CAPACITY};
