use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use engine_logging::engine_warn;
use tempfile::NamedTempFile;
use thiserror::Error;

const STATE_FILENAME: &str = "state.ron";
const CORRUPT_FILENAME: &str = "state.ron.corrupt";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data directory missing or not writable: {0}")]
    DataDir(String),
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to serialize store: {0}")]
    Serialize(String),
    #[error("failed to write {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Ensure the data directory exists; create if missing.
pub fn ensure_data_dir(dir: &Path) -> Result<(), StoreError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| StoreError::DataDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(StoreError::DataDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| StoreError::DataDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| StoreError::DataDir(e.to_string()))?;
    Ok(())
}

/// String key-value storage shared across sessions.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Stores all entries in one RON map file, rewritten atomically on every `set`.
///
/// An unparsable file reads as an error, but the next `set` moves it aside to
/// `state.ron.corrupt` and starts over from an empty map.
#[derive(Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
    // Serializes read-modify-write cycles.
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Opens the store in `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        ensure_data_dir(&dir)?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STATE_FILENAME)
    }

    pub fn corrupt_path(&self) -> PathBuf {
        self.dir.join(CORRUPT_FILENAME)
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        parse_entries(&path, &content)
    }

    fn read_for_update(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match self.read_all() {
            Err(StoreError::Parse { path, message }) => {
                let backup = self.corrupt_path();
                engine_warn!(
                    "{:?} is unreadable ({}); moving it to {:?} and starting empty",
                    path,
                    message,
                    backup
                );
                fs::rename(&path, &backup).map_err(|source| StoreError::Write {
                    path: backup,
                    source,
                })?;
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    /// Writes a temp file next to the target, then renames it over the target.
    fn write_atomically(&self, content: &str) -> Result<(), StoreError> {
        let target = self.path();
        let to_write_error = |source: io::Error| StoreError::Write {
            path: target.clone(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(to_write_error)?;
        tmp.write_all(content.as_bytes()).map_err(to_write_error)?;
        tmp.as_file_mut().sync_all().map_err(to_write_error)?;
        tmp.persist(&target)
            .map_err(|err| to_write_error(err.error))?;
        Ok(())
    }
}

fn parse_entries(path: &Path, content: &str) -> Result<BTreeMap<String, String>, StoreError> {
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    ron::from_str(content).map_err(|err| StoreError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_for_update()?;
        entries.insert(key.to_string(), value.to_string());

        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&entries, pretty)
            .map_err(|err| StoreError::Serialize(err.to_string()))?;
        self.write_atomically(&content)
    }
}

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
