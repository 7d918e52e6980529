// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Persistence boundary: a string key-value store plus the adapter that maps
//! posts and the sort preference onto it.
//!
//! Reads fail open (missing or malformed data yields defaults); writes report
//! errors so the caller can tell the user without losing in-memory state.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::post::Post;
use crate::models::sort::{SortMode, SortPreference};

/// Storage key holding the serialized post collection.
pub const POSTS_KEY: &str = "posts";
/// Storage key holding the persisted sort mode.
pub const SORT_PREFERENCE_KEY: &str = "sortPreference";

/// Failures raised by the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create storage directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read `{key}` from storage: {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write `{key}` to storage: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode posts: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("stored `{key}` is malformed: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Minimal string key-value persistence, one value per key.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Directory-backed store: each key is a file replaced atomically on write.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the storage directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StorageError::CreateDir {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };

        // Write next to the target so the final rename stays on one filesystem.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root).map_err(write_err)?;
        tmp.write_all(value.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(self.path_for(key))
            .map_err(|err| write_err(err.error))?;
        Ok(())
    }
}

/// Maps the post collection and sort preference onto a [`KeyValueStore`].
pub struct StorageAdapter<S> {
    backend: S,
}

impl<S: KeyValueStore> StorageAdapter<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// Load the persisted posts, falling back to an empty collection.
    pub fn load(&self) -> Vec<Post> {
        match self.try_load() {
            Ok(posts) => {
                debug!(count = posts.len(), "loaded posts");
                posts
            }
            Err(err) => {
                warn!(error = %err, "ignoring unreadable post collection");
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<Vec<Post>, StorageError> {
        let Some(raw) = self.backend.get(POSTS_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
            key: POSTS_KEY.to_string(),
            source,
        })
    }

    /// Serialize the whole collection as one value, replacing the previous one.
    pub fn save(&mut self, posts: &[Post]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(posts).map_err(StorageError::Encode)?;
        self.backend.set(POSTS_KEY, &raw)?;
        debug!(count = posts.len(), "saved posts");
        Ok(())
    }

    /// Load the persisted sort preference; nothing stored means newest first.
    pub fn load_sort_preference(&self) -> SortPreference {
        match self.backend.get(SORT_PREFERENCE_KEY) {
            Ok(Some(raw)) => {
                let pref = SortPreference::from_key(&raw);
                if pref.mode().is_none() {
                    warn!(
                        value = pref.key(),
                        "unrecognized sort preference, keeping insertion order"
                    );
                }
                pref
            }
            Ok(None) => SortPreference::default(),
            Err(err) => {
                warn!(error = %err, "failed to read sort preference, using default");
                SortPreference::default()
            }
        }
    }

    pub fn save_sort_preference(&mut self, mode: SortMode) -> Result<(), StorageError> {
        self.backend.set(SORT_PREFERENCE_KEY, mode.as_str())
    }
}

/// In-memory store used by tests; counts writes and can simulate failures.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: std::collections::HashMap<String, String>,
    writes: usize,
    fail_writes: bool,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Write {
                key: key.to_string(),
                source: io::Error::other("quota exceeded"),
            });
        }
        self.writes += 1;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
