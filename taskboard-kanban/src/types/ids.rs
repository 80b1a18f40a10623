//! Strongly typed identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh ULID-based id
            pub fn new() -> Self {
                Self(ulid::Ulid::new().to_string())
            }

            /// Wrap an existing id string
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the inner string value
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Task identifier, assigned once at creation and never reused
    TaskId
);

define_id!(
    /// Column identifier; doubles as a task status value
    ColumnId
);

/// Status a new task gets when the board has no columns, and the target of `cancel`
pub const TODO_STATUS: &str = "TODO";

/// Status applied when an AI run starts
pub const IN_PROGRESS_STATUS: &str = "IN_PROGRESS";

/// Status applied when an AI run succeeds
pub const DONE_STATUS: &str = "DONE";

impl ColumnId {
    pub fn todo() -> Self {
        Self::from_string(TODO_STATUS)
    }

    pub fn in_progress() -> Self {
        Self::from_string(IN_PROGRESS_STATUS)
    }

    pub fn done() -> Self {
        Self::from_string(DONE_STATUS)
    }

    /// True for the statuses that exist before any column is created
    pub fn is_reserved(&self) -> bool {
        matches!(
            self.as_str(),
            TODO_STATUS | IN_PROGRESS_STATUS | DONE_STATUS
        )
    }
}
