//! File-backed snapshot store
//!
//! One directory per board. The snapshot is a single pretty-printed JSON
//! file written atomically (temp file + rename), so readers never observe a
//! half-written board. An advisory `.lock` file guards against two processes
//! writing the same board at once.

use crate::error::{Result, StoreError};
use crate::journal::Journal;
use crate::snapshot::SnapshotStore;
use async_trait::async_trait;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Snapshot store rooted at a directory
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to snapshot.json
    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join("snapshot.json")
    }

    /// Path to journal.jsonl
    pub fn journal_path(&self) -> PathBuf {
        self.root.join("journal.jsonl")
    }

    /// Path to the lock file
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }

    /// The operation journal stored alongside the snapshot
    pub fn journal(&self) -> Journal {
        Journal::new(self.journal_path())
    }

    /// Check whether a snapshot has ever been saved here
    pub fn is_initialized(&self) -> bool {
        self.snapshot_path().exists()
    }

    /// Create the root directory if it is missing (idempotent)
    pub async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Try to acquire an exclusive lock (non-blocking)
    pub async fn lock(&self) -> Result<StoreLock> {
        self.ensure_root().await?;

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.lock_path())?;

        // Non-blocking lock attempt
        match file.try_lock_exclusive() {
            Ok(()) => Ok(StoreLock { file }),
            Err(_) => Err(StoreError::LockBusy),
        }
    }
}

#[async_trait]
impl<T> SnapshotStore<T> for FileStore
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load(&self) -> Result<Option<T>> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await?;
        let value = serde_json::from_str(&content)?;
        Ok(Some(value))
    }

    async fn save(&self, value: &T) -> Result<()> {
        let path = self.snapshot_path();
        let content = serde_json::to_string_pretty(value)?;
        atomic_write(&path, content.as_bytes()).await?;
        debug!(path = %path.display(), "snapshot saved");
        Ok(())
    }
}

/// RAII lock guard - releases on drop
pub struct StoreLock {
    file: std::fs::File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    // Write to temp file in same directory
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;

    // Rename (atomic on same filesystem)
    fs::rename(&temp_path, path).await?;

    Ok(())
}
