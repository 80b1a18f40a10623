//! Versioned snapshot envelope
//!
//! Snapshots are written as `{"version": N, "state": {...}}`. A bare state
//! object without the envelope is read as version 0. On load the state is
//! stepped through [`Migrations`] one version at a time up to
//! [`CURRENT_SCHEMA_VERSION`]; versions without a registered step pass
//! through unchanged.

use crate::error::{KanbanError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Schema version written by this build
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Upgrade step from version `n` to `n + 1`
pub type MigrationFn = fn(Value) -> Result<Value>;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    state: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    state: Value,
}

/// Registered upgrade steps keyed by the version they upgrade from
#[derive(Debug, Clone, Default)]
pub struct Migrations {
    steps: BTreeMap<u32, MigrationFn>,
}

impl Migrations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the step that upgrades `from` to `from + 1`
    pub fn with_step(mut self, from: u32, step: MigrationFn) -> Self {
        self.steps.insert(from, step);
        self
    }

    /// Upgrade `state` from `version` to the current schema
    pub fn upgrade(&self, mut state: Value, version: u32) -> Result<Value> {
        if version > CURRENT_SCHEMA_VERSION {
            return Err(KanbanError::UnsupportedSchemaVersion {
                found: version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        for from in version..CURRENT_SCHEMA_VERSION {
            if let Some(step) = self.steps.get(&from) {
                tracing::debug!(from, to = from + 1, "migrating snapshot");
                state = step(state)?;
            }
        }
        Ok(state)
    }
}

/// Serialize `state` inside a current-version envelope
pub fn encode_snapshot<T: Serialize>(state: &T) -> Result<Vec<u8>> {
    let envelope = EnvelopeRef {
        version: CURRENT_SCHEMA_VERSION,
        state,
    };
    Ok(serde_json::to_vec_pretty(&envelope)?)
}

/// Parse a snapshot, upgrading older versions
pub fn decode_snapshot<T: DeserializeOwned>(bytes: &[u8], migrations: &Migrations) -> Result<T> {
    let raw: Value = serde_json::from_slice(bytes)?;

    let (version, state) = if is_envelope(&raw) {
        let envelope: Envelope = serde_json::from_value(raw)?;
        (envelope.version, envelope.state)
    } else {
        (0, raw)
    };

    let state = migrations.upgrade(state, version)?;
    Ok(serde_json::from_value(state)?)
}

fn is_envelope(raw: &Value) -> bool {
    raw.as_object().is_some_and(|obj| {
        obj.get("version").is_some_and(Value::is_u64) && obj.contains_key("state")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
    }

    #[test]
    fn test_encode_wraps_in_envelope() {
        let bytes = encode_snapshot(&Sample { name: "a".into() }).unwrap();
        let raw: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(raw["version"], CURRENT_SCHEMA_VERSION);
        assert_eq!(raw["state"]["name"], "a");
    }

    #[test]
    fn test_legacy_bare_state_is_accepted() {
        let bytes = serde_json::to_vec(&json!({"name": "legacy"})).unwrap();
        let sample: Sample = decode_snapshot(&bytes, &Migrations::new()).unwrap();
        assert_eq!(sample.name, "legacy");
    }

    #[test]
    fn test_migration_step_runs_for_old_versions() {
        fn rename(mut state: Value) -> Result<Value> {
            if let Some(obj) = state.as_object_mut() {
                if let Some(title) = obj.remove("title") {
                    obj.insert("name".into(), title);
                }
            }
            Ok(state)
        }

        let migrations = Migrations::new().with_step(0, rename);
        let bytes = serde_json::to_vec(&json!({"title": "old"})).unwrap();
        let sample: Sample = decode_snapshot(&bytes, &migrations).unwrap();
        assert_eq!(sample.name, "old");

        // already current: step is skipped
        let bytes = encode_snapshot(&Sample { name: "new".into() }).unwrap();
        let sample: Sample = decode_snapshot(&bytes, &migrations).unwrap();
        assert_eq!(sample.name, "new");
    }

    #[test]
    fn test_newer_version_rejected() {
        let bytes = serde_json::to_vec(&json!({"version": 99, "state": {"name": "x"}})).unwrap();
        let result: Result<Sample> = decode_snapshot(&bytes, &Migrations::new());
        assert!(matches!(
            result,
            Err(KanbanError::UnsupportedSchemaVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_corrupt_snapshot_is_json_error() {
        let result: Result<Sample> = decode_snapshot(b"not json", &Migrations::new());
        assert!(matches!(result, Err(KanbanError::Json(_))));
    }
}
