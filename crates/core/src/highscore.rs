//! High-score persistence
//!
//! The on-disk format is a single non-negative decimal integer followed by a
//! newline. [`HighScore`] keeps the in-memory best, which never goes down
//! within a process: a stored value below it is ignored, and store failures
//! are logged and swallowed so the game keeps running.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score file {path} does not hold an integer: {contents:?}")]
    Parse { path: PathBuf, contents: String },
}

/// Backing storage for a best score.
pub trait ScoreStore: Send {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<u32>, StoreError>;
    fn save(&self, value: u32) -> Result<(), StoreError>;
}

/// Parse the first whitespace-separated token as a score.
///
/// Negative values read as 0; values past `u32::MAX` saturate.
pub fn parse_score(contents: &str) -> Option<u32> {
    let token = contents.split_whitespace().next()?;
    match token.parse::<i64>() {
        Ok(v) if v < 0 => Some(0),
        Ok(v) => Some(u32::try_from(v).unwrap_or(u32::MAX)),
        Err(_) => {
            // Out of i64 range but still a plain integer.
            let (negative, digits) = match token.as_bytes().first() {
                Some(b'-') => (true, &token[1..]),
                Some(b'+') => (false, &token[1..]),
                _ => (false, token),
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            Some(if negative { 0 } else { u32::MAX })
        }
    }
}

/// Plain-text file store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ScoreStore for FileStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        match parse_score(&contents) {
            Some(v) => Ok(Some(v)),
            None => Err(StoreError::Parse {
                path: self.path.clone(),
                contents,
            }),
        }
    }

    fn save(&self, value: u32) -> Result<(), StoreError> {
        fs::write(&self.path, format!("{value}\n")).map_err(|e| self.io_error(e))
    }
}

/// Shared in-memory store. Clones see the same value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Arc<Mutex<Option<u32>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        let store = Self::default();
        store.set(Some(value));
        store
    }

    fn slot(&self) -> MutexGuard<'_, Option<u32>> {
        self.value.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self) -> Option<u32> {
        *self.slot()
    }

    /// Overwrite (or erase) the stored value behind the keeper's back.
    pub fn set(&self, value: Option<u32>) {
        *self.slot() = value;
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.get())
    }

    fn save(&self, value: u32) -> Result<(), StoreError> {
        self.set(Some(value));
        Ok(())
    }
}

/// In-memory best score with write-through persistence.
pub struct HighScore {
    value: u32,
    loaded: bool,
    store: Box<dyn ScoreStore>,
}

impl HighScore {
    pub fn new(store: impl ScoreStore + 'static) -> Self {
        Self {
            value: 0,
            loaded: false,
            store: Box::new(store),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FileStore::new(path))
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Load from the store the first time only.
    pub fn load_once(&mut self) {
        if !self.loaded {
            self.reload();
        }
    }

    /// Re-read the store, keeping the in-memory value if it is higher.
    pub fn reload(&mut self) {
        self.loaded = true;
        match self.store.load() {
            Ok(Some(stored)) if stored > self.value => self.value = stored,
            Ok(Some(stored)) => {
                debug!("ignoring stored high score {stored} (in memory: {})", self.value)
            }
            Ok(None) => debug!("no stored high score yet"),
            Err(e) => warn!("could not load high score: {e}"),
        }
    }

    /// Record `score`; persists and returns true when it beats the best.
    pub fn observe(&mut self, score: u32) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        info!("new high score {score}");
        if let Err(e) = self.store.save(score) {
            warn!("could not save high score: {e}");
        }
        true
    }
}

impl std::fmt::Debug for HighScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScore")
            .field("value", &self.value)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_plain_integers() {
        assert_eq!(parse_score("1200\n"), Some(1200));
        assert_eq!(parse_score("  7  trailing"), Some(7));
        assert_eq!(parse_score("+5"), Some(5));
    }

    #[test]
    fn test_parse_clamps_out_of_range() {
        assert_eq!(parse_score("-4"), Some(0));
        assert_eq!(parse_score("4294967296"), Some(u32::MAX));
        assert_eq!(parse_score("99999999999999999999999"), Some(u32::MAX));
        assert_eq!(parse_score("-99999999999999999999999"), Some(0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("abc"), None);
        assert_eq!(parse_score("12abc"), None);
        assert_eq!(parse_score("-"), None);
    }

    #[test]
    fn test_file_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.txt"));
        assert!(matches!(store.load(), Ok(None)));
    }

    #[test]
    fn test_file_store_writes_value_and_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score.txt");
        let store = FileStore::new(&path);
        store.save(300).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "300\n");
        assert_eq!(store.load().unwrap(), Some(300));
    }

    #[test]
    fn test_file_store_reports_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score.txt");
        fs::write(&path, "not a number").unwrap();
        let err = FileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn test_unreadable_file_loads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score.txt");
        fs::write(&path, "garbage").unwrap();
        let mut high = HighScore::from_path(&path);
        high.load_once();
        assert_eq!(high.value(), 0);
    }

    #[test]
    fn test_keeper_never_lowers() {
        let store = MemoryStore::with_value(500);
        let mut high = HighScore::new(store.clone());
        high.load_once();
        assert_eq!(high.value(), 500);

        store.set(Some(100));
        high.reload();
        assert_eq!(high.value(), 500);

        store.set(None);
        high.reload();
        assert_eq!(high.value(), 500);
    }

    #[test]
    fn test_load_once_ignores_later_store_changes() {
        let store = MemoryStore::with_value(10);
        let mut high = HighScore::new(store.clone());
        high.load_once();
        store.set(Some(90));
        high.load_once();
        assert_eq!(high.value(), 10);
    }

    #[test]
    fn test_observe_persists_only_improvements() {
        let store = MemoryStore::new();
        let mut high = HighScore::new(store.clone());
        high.load_once();

        assert!(high.observe(3));
        assert_eq!(store.get(), Some(3));
        assert!(!high.observe(3));
        assert!(!high.observe(1));
        assert_eq!(high.value(), 3);
    }

    #[test]
    fn test_save_failure_keeps_value_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        // A directory path cannot be written as a file.
        let mut high = HighScore::from_path(dir.path());
        high.load_once();
        assert!(high.observe(8));
        assert_eq!(high.value(), 8);
    }
}
