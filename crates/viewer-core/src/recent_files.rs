//! Recent Files Management
//!
//! This module tracks recently opened documents, local files and remote URLs alike, and
//! persists them through a [`KeyValueStore`]. The list is used to populate the "recent"
//! section of the home screen.
//!
//! Any failure of the persistent backend switches the store to an in-memory list for the rest
//! of its lifetime. Callers never see storage errors; the only consequence is that entries may
//! not survive a restart.

use doc_model::{decode_entries, encode_entries, DecodeError, RecentFileEntry};
use storage::{KeyValueStore, StorageError};

use crate::probe::{FileProbe, LocalFileSystem};

/// Maximum number of recent files to track
pub const MAX_RECENT_FILES: usize = 10;

/// Storage slot holding the JSON array of entries
pub const RECENT_FILES_KEY: &str = "recent_files";

/// Which backend the store is currently operating against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    Persistent,
    Memory,
}

#[derive(Debug)]
enum Backend<S> {
    Persistent(S),
    Memory,
}

#[derive(Debug, thiserror::Error)]
enum BackendFailure {
    #[error("storage unavailable: {0}")]
    Storage(#[from] StorageError),
    #[error("stored list could not be decoded: {0}")]
    Decode(#[from] DecodeError),
}

/// Owns the recent files list and its persisted representation.
#[derive(Debug)]
pub struct RecentFilesStore<S, P = LocalFileSystem> {
    backend: Backend<S>,
    probe: P,
    /// Last known list; authoritative once the backend is `Memory`
    memory: Vec<RecentFileEntry>,
}

impl<S: KeyValueStore> RecentFilesStore<S, LocalFileSystem> {
    /// Creates a store persisting to `storage` and checking local paths on the real filesystem.
    pub fn new(storage: S) -> Self {
        Self::with_probe(storage, LocalFileSystem)
    }
}

impl<S: KeyValueStore, P: FileProbe> RecentFilesStore<S, P> {
    pub fn with_probe(storage: S, probe: P) -> Self {
        Self { backend: Backend::Persistent(storage), probe, memory: Vec::new() }
    }

    pub fn mode(&self) -> BackendMode {
        match self.backend {
            Backend::Persistent(_) => BackendMode::Persistent,
            Backend::Memory => BackendMode::Memory,
        }
    }

    pub fn capacity(&self) -> usize {
        MAX_RECENT_FILES
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// The persistent backend, until the store has fallen back to memory.
    pub fn storage(&self) -> Option<&S> {
        match &self.backend {
            Backend::Persistent(storage) => Some(storage),
            Backend::Memory => None,
        }
    }

    /// Adds an entry to the front of the list.
    ///
    /// An existing entry for the same document (same kind of identifier) is replaced, and the
    /// list is capped at [`MAX_RECENT_FILES`] entries.
    pub fn add(&mut self, entry: RecentFileEntry) {
        log::debug!("recording recent file {}", entry.identifier());
        self.update("add", move |entries| {
            entries.retain(|existing| !entry.is_same_document(existing));
            entries.insert(0, entry);
            entries.truncate(MAX_RECENT_FILES);
        });
    }

    /// Returns the list, most recent first.
    ///
    /// Against the persistent backend, local entries whose file no longer exists are dropped
    /// and the shorter list is written back. The memory backend is returned as is.
    pub fn list(&mut self) -> Vec<RecentFileEntry> {
        let Backend::Persistent(storage) = &mut self.backend else {
            return self.memory.clone();
        };

        let loaded = match load(storage) {
            Ok(entries) => entries,
            Err(failure) => {
                self.fall_back("list", failure);
                return self.memory.clone();
            }
        };

        let loaded_len = loaded.len();
        let probe = &self.probe;
        let entries: Vec<RecentFileEntry> = loaded
            .into_iter()
            .filter(|entry| {
                entry.is_remote() || entry.local_path().is_some_and(|path| probe.is_file(path))
            })
            .collect();

        let stale = loaded_len - entries.len();
        let saved = if stale > 0 {
            log::debug!("dropping {stale} recent file(s) that no longer exist");
            save(storage, &entries)
        } else {
            Ok(())
        };

        self.memory = entries.clone();
        if let Err(failure) = saved {
            self.fall_back("list", failure);
        }

        entries
    }

    /// Removes every entry whose local path or remote URL equals `identifier`.
    pub fn remove(&mut self, identifier: &str) {
        log::debug!("removing recent file {identifier}");
        self.update("remove", |entries| {
            entries.retain(|entry| !entry.matches_identifier(identifier));
        });
    }

    /// Empties the list and deletes the persisted slot.
    pub fn clear(&mut self) {
        log::debug!("clearing recent files");
        self.memory.clear();

        if let Backend::Persistent(storage) = &mut self.backend {
            if let Err(e) = storage.remove(RECENT_FILES_KEY) {
                self.fall_back("clear", e.into());
            }
        }
    }

    /// Applies `op` to the current list exactly once and persists the result.
    fn update(&mut self, operation: &str, op: impl FnOnce(&mut Vec<RecentFileEntry>)) {
        let result = match &mut self.backend {
            Backend::Persistent(storage) => match load(storage) {
                Ok(mut entries) => {
                    op(&mut entries);
                    let saved = save(storage, &entries);
                    self.memory = entries;
                    saved
                }
                Err(failure) => {
                    op(&mut self.memory);
                    Err(failure)
                }
            },
            Backend::Memory => {
                op(&mut self.memory);
                Ok(())
            }
        };

        if let Err(failure) = result {
            self.fall_back(operation, failure);
        }
    }

    fn fall_back(&mut self, operation: &str, failure: BackendFailure) {
        log::warn!(
            "recent files {operation} failed ({failure}); keeping recent files in memory only"
        );
        self.backend = Backend::Memory;
    }
}

fn load<S: KeyValueStore>(storage: &S) -> Result<Vec<RecentFileEntry>, BackendFailure> {
    match storage.get_string(RECENT_FILES_KEY)? {
        Some(json) => Ok(decode_entries(&json)?),
        None => Ok(Vec::new()),
    }
}

fn save<S: KeyValueStore>(
    storage: &mut S,
    entries: &[RecentFileEntry],
) -> Result<(), BackendFailure> {
    storage.set_string(RECENT_FILES_KEY, &encode_entries(entries))?;
    Ok(())
}
