//! File-backed snapshot storage: one `<key>.json` per snapshot

use super::{validate_key, SnapshotStorage};
use crate::error::{KanbanError, Result};
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores snapshots as files in a directory.
///
/// Writes go through a temp file and rename, under an exclusive lock on
/// `<dir>/.lock`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to a snapshot file
    pub fn snapshot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Path to the lock file
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }

    /// Try to acquire an exclusive lock (non-blocking)
    pub fn lock(&self) -> Result<SnapshotLock> {
        fs::create_dir_all(&self.root)?;

        let file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.lock_path())?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(SnapshotLock { file }),
            Err(_) => Err(KanbanError::LockBusy),
        }
    }
}

impl SnapshotStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_key(key)?;
        let path = self.snapshot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(path)?))
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<()> {
        validate_key(key)?;
        let _lock = self.lock()?;
        atomic_write(&self.snapshot_path(key), bytes)
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let path = self.snapshot_path(key);
        if path.exists() {
            let _lock = self.lock()?;
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// RAII lock guard - releases on drop
pub struct SnapshotLock {
    file: fs::File,
}

impl Drop for SnapshotLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Atomic write via temp file and rename
fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStorage) {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path().join(".taskboard"));
        (temp, storage)
    }

    #[test]
    fn test_paths() {
        let (temp, storage) = setup();
        let root = temp.path().join(".taskboard");
        assert_eq!(storage.root(), root);
        assert_eq!(storage.snapshot_path("kanban-board"), root.join("kanban-board.json"));
    }

    #[test]
    fn test_save_creates_directory_and_loads_back() {
        let (_temp, storage) = setup();
        assert!(!storage.root().exists());

        storage.save("kanban-view", br#"{"version":1}"#).unwrap();
        assert!(storage.root().is_dir());
        assert_eq!(
            storage.load("kanban-view").unwrap().as_deref(),
            Some(&br#"{"version":1}"#[..])
        );
        assert!(!storage.snapshot_path("kanban-view").with_extension("tmp").exists());
    }

    #[test]
    fn test_load_missing() {
        let (_temp, storage) = setup();
        assert!(storage.load("kanban-board").unwrap().is_none());
    }

    #[test]
    fn test_remove() {
        let (_temp, storage) = setup();
        storage.save("kanban-board", b"{}").unwrap();
        storage.remove("kanban-board").unwrap();
        assert!(storage.load("kanban-board").unwrap().is_none());
        storage.remove("kanban-board").unwrap();
    }

    #[test]
    fn test_locking() {
        let (_temp, storage) = setup();

        let lock1 = storage.lock().unwrap();
        let result = storage.save("kanban-board", b"{}");
        assert!(matches!(result, Err(KanbanError::LockBusy)));

        drop(lock1);
        storage.save("kanban-board", b"{}").unwrap();
    }

    #[test]
    fn test_rejects_path_keys() {
        let (_temp, storage) = setup();
        assert!(storage.save("../outside", b"{}").is_err());
    }
}
