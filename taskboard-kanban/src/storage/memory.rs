//! In-memory snapshot storage

use super::{validate_key, SnapshotStorage};
use crate::error::Result;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Snapshot storage that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshots: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshots(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.snapshots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.snapshots().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots().is_empty()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self.snapshots().get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<()> {
        validate_key(key)?;
        self.snapshots().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.snapshots().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_and_remove() {
        let storage = MemoryStorage::new();
        assert!(storage.load("kanban-board").unwrap().is_none());

        storage.save("kanban-board", b"{}").unwrap();
        assert_eq!(storage.load("kanban-board").unwrap().as_deref(), Some(&b"{}"[..]));
        assert_eq!(storage.len(), 1);

        storage.remove("kanban-board").unwrap();
        assert!(storage.is_empty());
        storage.remove("kanban-board").unwrap();
    }
}
