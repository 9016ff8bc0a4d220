//! Persistence of daily records and preferences
//!
//! The store only ever holds small JSON documents, read and written wholesale.
//! A missing document reads as empty; so does a corrupt one, after a warning.

use crate::core::Difficulty;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::warn;

const DAILY_FILE: &str = "daily.json";
const HISTORY_FILE: &str = "history.json";
const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One day's challenge as the player left it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub word: String,
    pub difficulty: Difficulty,
    pub session_id: String,
    pub completed: bool,
    pub won: bool,
    pub attempts: usize,
    /// Guessed words, in order
    #[serde(default)]
    pub guesses: Vec<String>,
    /// Emoji feedback row per guess
    #[serde(default)]
    pub rows: Vec<String>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Daily history keyed by date; one record per day
pub type History = BTreeMap<NaiveDate, DailyRecord>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Preferences {
    #[serde(default)]
    last_difficulty: Option<Difficulty>,
}

/// Where player state lives between runs
pub trait StateStore: Send + Sync {
    /// The most recent daily record, whatever its date
    ///
    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be read.
    fn load_daily(&self) -> Result<Option<DailyRecord>, StoreError>;

    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be written.
    fn save_daily(&self, record: &DailyRecord) -> Result<(), StoreError>;

    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be read.
    fn load_history(&self) -> Result<History, StoreError>;

    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be written.
    fn save_history(&self, history: &History) -> Result<(), StoreError>;

    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be read.
    fn last_difficulty(&self) -> Result<Option<Difficulty>, StoreError>;

    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be written.
    fn set_last_difficulty(&self, difficulty: Difficulty) -> Result<(), StoreError>;

    /// Add a record to the history, replacing any record for the same date
    ///
    /// # Errors
    /// Returns `StoreError` if the history cannot be read or written.
    fn append_history(&self, record: &DailyRecord) -> Result<(), StoreError> {
        let mut history = self.load_history()?;
        history.insert(record.date, record.clone());
        self.save_history(&history)
    }
}

/// JSON files in a state directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, StoreError> {
        let path = self.dir.join(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        Ok(serde_json::from_str(&contents).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "corrupt state file, starting fresh");
            T::default()
        }))
    }

    fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json).map_err(|source| StoreError::Io { path, source })
    }
}

impl StateStore for FileStore {
    fn load_daily(&self) -> Result<Option<DailyRecord>, StoreError> {
        self.read(DAILY_FILE)
    }

    fn save_daily(&self, record: &DailyRecord) -> Result<(), StoreError> {
        self.write(DAILY_FILE, record)
    }

    fn load_history(&self) -> Result<History, StoreError> {
        self.read(HISTORY_FILE)
    }

    fn save_history(&self, history: &History) -> Result<(), StoreError> {
        self.write(HISTORY_FILE, history)
    }

    fn last_difficulty(&self) -> Result<Option<Difficulty>, StoreError> {
        Ok(self.read::<Preferences>(PREFERENCES_FILE)?.last_difficulty)
    }

    fn set_last_difficulty(&self, difficulty: Difficulty) -> Result<(), StoreError> {
        self.write(
            PREFERENCES_FILE,
            &Preferences {
                last_difficulty: Some(difficulty),
            },
        )
    }
}

/// In-memory store for tests and ephemeral play
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    daily: Option<DailyRecord>,
    history: History,
    preferences: Preferences,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with<T>(&self, f: impl FnOnce(&mut MemoryState) -> T) -> T {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

impl StateStore for MemoryStore {
    fn load_daily(&self) -> Result<Option<DailyRecord>, StoreError> {
        Ok(self.with(|state| state.daily.clone()))
    }

    fn save_daily(&self, record: &DailyRecord) -> Result<(), StoreError> {
        self.with(|state| state.daily = Some(record.clone()));
        Ok(())
    }

    fn load_history(&self) -> Result<History, StoreError> {
        Ok(self.with(|state| state.history.clone()))
    }

    fn save_history(&self, history: &History) -> Result<(), StoreError> {
        self.with(|state| state.history = history.clone());
        Ok(())
    }

    fn last_difficulty(&self) -> Result<Option<Difficulty>, StoreError> {
        Ok(self.with(|state| state.preferences.last_difficulty))
    }

    fn set_last_difficulty(&self, difficulty: Difficulty) -> Result<(), StoreError> {
        self.with(|state| state.preferences.last_difficulty = Some(difficulty));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(day: u32, won: bool) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            word: "jardin".to_string(),
            difficulty: Difficulty::Easy,
            session_id: format!("daily-202610{day:02}"),
            completed: true,
            won,
            attempts: 4,
            guesses: vec!["jouets".to_string()],
            rows: vec!["🟩⬜⬜⬜⬜⬜".to_string()],
            completed_at: None,
        }
    }

    #[test]
    fn missing_files_read_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("state"));

        assert_eq!(store.load_daily().unwrap(), None);
        assert!(store.load_history().unwrap().is_empty());
        assert_eq!(store.last_difficulty().unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        FileStore::new(dir.path()).save_daily(&record(17, true)).unwrap();

        let reopened = FileStore::new(dir.path());
        assert_eq!(reopened.load_daily().unwrap(), Some(record(17, true)));
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(HISTORY_FILE), "{ not json").unwrap();

        let store = FileStore::new(dir.path());
        assert!(store.load_history().unwrap().is_empty());
    }

    #[test]
    fn history_is_keyed_by_date() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        store.append_history(&record(16, false)).unwrap();
        store.append_history(&record(17, false)).unwrap();
        store.append_history(&record(17, true)).unwrap();

        let history = store.load_history().unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[&NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()].won);
    }

    #[test]
    fn preferences_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.set_last_difficulty(Difficulty::Hard).unwrap();
        assert_eq!(store.last_difficulty().unwrap(), Some(Difficulty::Hard));
    }

    #[test]
    fn memory_store_behaves_like_file_store() {
        let store = MemoryStore::new();
        assert_eq!(store.load_daily().unwrap(), None);

        store.save_daily(&record(1, true)).unwrap();
        store.append_history(&record(1, true)).unwrap();
        store.set_last_difficulty(Difficulty::Easy).unwrap();

        assert_eq!(store.load_daily().unwrap(), Some(record(1, true)));
        assert_eq!(store.load_history().unwrap().len(), 1);
        assert_eq!(store.last_difficulty().unwrap(), Some(Difficulty::Easy));
    }
}
