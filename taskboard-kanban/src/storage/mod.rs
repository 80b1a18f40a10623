//! Durable snapshot storage
//!
//! State is persisted as whole named snapshots (one for the board, one for
//! view preferences). Each snapshot is a versioned JSON envelope, see
//! [`snapshot`].

mod file;
mod memory;
pub mod snapshot;

pub use file::{FileStorage, SnapshotLock};
pub use memory::MemoryStorage;
pub use snapshot::{decode_snapshot, encode_snapshot, Migrations, CURRENT_SCHEMA_VERSION};

use crate::error::{KanbanError, Result};

/// Key/value store for serialized snapshots
pub trait SnapshotStorage: Send + Sync {
    /// Read a snapshot, `None` when the key was never written
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace a snapshot
    fn save(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Delete a snapshot; missing keys are not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Reject keys that cannot be used as a file stem
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(KanbanError::invalid_value(
            "snapshot key",
            format!("'{key}' must be non-empty ASCII letters, digits, '-', '_' or '.'"),
        ))
    }
}
