//! File-Backed Key-Value Store
//!
//! Implements `KeyValueStore` as a bincode snapshot inside a data directory.
//!
//! Every `set` rewrites the snapshot through a temp file and an atomic rename,
//! so a crash leaves either the old or the new snapshot on disk. The data
//! directory is guarded by an exclusive `fs2` lock held for the lifetime of
//! the store: one writer per directory.

use crate::domain::StoreError;
use crate::ports::KeyValueStore;
use fs2::FileExt;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SNAPSHOT_FILE: &str = "registry.db";
const SNAPSHOT_TMP_FILE: &str = "registry.db.tmp";
const LOCK_FILE: &str = "LOCK";

/// Durable key-value store rooted at a data directory.
pub struct FileKvStore {
    dir: PathBuf,
    entries: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
    /// Held for its exclusive lock; released on drop.
    _lock: File,
}

impl FileKvStore {
    /// Open (or create) the store in `dir`.
    ///
    /// Fails with [`StoreError::Locked`] if another process holds the directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let lock = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(dir.join(LOCK_FILE))?;
        lock.try_lock_exclusive()
            .map_err(|_| StoreError::Locked(dir.display().to_string()))?;

        let snapshot = dir.join(SNAPSHOT_FILE);
        let entries = if snapshot.exists() {
            let bytes = fs::read(&snapshot)?;
            bincode::deserialize(&bytes)?
        } else {
            HashMap::new()
        };

        info!(
            path = %dir.display(),
            keys = entries.len(),
            "Opened file-backed registry store"
        );

        Ok(Self {
            dir,
            entries: RwLock::new(entries),
            _lock: lock,
        })
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn persist(&self, entries: &HashMap<Vec<u8>, Vec<u8>>) -> Result<(), StoreError> {
        let bytes = bincode::serialize(entries)?;
        let tmp = self.dir.join(SNAPSHOT_TMP_FILE);

        let mut file = File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, self.dir.join(SNAPSHOT_FILE))?;

        debug!(bytes = bytes.len(), "Persisted registry snapshot");
        Ok(())
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: Vec<u8>, value: Vec<u8>) -> Result<(), StoreError> {
        let mut entries = self.entries.write();
        let previous = entries.insert(key.clone(), value);

        if let Err(err) = self.persist(&entries) {
            // Roll back so memory never runs ahead of disk.
            match previous {
                Some(old) => entries.insert(key, old),
                None => entries.remove(&key),
            };
            return Err(err);
        }
        Ok(())
    }
}
