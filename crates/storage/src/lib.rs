use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("unable to resolve local data directory")]
    NoDataDirectory,
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Durable string slots addressed by key.
pub trait KeyValueStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a key that was never set succeeds.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// File-backed store keeping one `<key>.json` file per slot under a root directory.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for Storage {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.root)?;

        // Slots are replaced by rename, never written in place.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;

        log::debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Volatile store backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.slots.get(key).cloned())
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.slots.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.slots.remove(key);
        Ok(())
    }
}

/// Platform data directory for the application.
///
/// - macOS: ~/Library/Application Support/dev.PdfViewer.PdfViewer
/// - Linux: ~/.local/share/pdfviewer
/// - Windows: %LOCALAPPDATA%\PdfViewer\PdfViewer\data
pub fn default_data_dir() -> Result<PathBuf, StorageError> {
    let dirs =
        ProjectDirs::from("dev", "PdfViewer", "PdfViewer").ok_or(StorageError::NoDataDirectory)?;

    Ok(dirs.data_local_dir().to_path_buf())
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}
