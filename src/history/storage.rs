//! History storage implementation

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use super::models::HistoryEntry;

/// Maximum number of lookups kept; recording past this evicts the oldest
pub const HISTORY_CAPACITY: usize = 10;

/// Errors from reading or writing the history file
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

type Result<T> = std::result::Result<T, HistoryError>;

/// File-backed, newest-first lookup history
pub struct HistoryStorage {
    data_dir: PathBuf,
}

impl HistoryStorage {
    /// Create the storage, making sure the data directory exists
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn history_file(&self) -> PathBuf {
        self.data_dir.join("tracking-history.json")
    }

    /// List recorded lookups, newest first. A missing file is an empty list.
    pub fn list(&self) -> Result<Vec<HistoryEntry>> {
        let path = self.history_file();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)?;
        let entries: Vec<HistoryEntry> = serde_json::from_str(&content)?;
        Ok(entries)
    }

    /// Record a lookup at the front of the list, evicting past capacity
    pub fn record(&self, entry: HistoryEntry) -> Result<HistoryEntry> {
        let mut entries = self.list()?;
        entries.insert(0, entry.clone());
        entries.truncate(HISTORY_CAPACITY);
        self.save(&entries)?;

        log::debug!("recorded lookup {} ({} kept)", entry.id, entries.len());
        Ok(entry)
    }

    /// Remove all recorded lookups
    pub fn clear(&self) -> Result<()> {
        let path = self.history_file();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(self.history_file(), json)?;
        Ok(())
    }
}
