//! Taskboard configuration management using Figment
//!
//! Settings for the kanban core: where snapshots are persisted, the snapshot
//! keys, activity log retention and the AI run simulation.
//!
//! # Sources
//!
//! Precedence, lowest first: defaults → `taskboard.{json,yaml,yml,toml}` in the
//! searched directories → an explicit file → `TASKBOARD_*` environment variables.
//! Nested keys use `__` in environment names, e.g.
//! `TASKBOARD_AI__DEFAULT_ETA_SECONDS=10`.
//!
//! ```toml
//! storage_dir = ".taskboard"
//! board_snapshot_key = "kanban-board"
//! view_snapshot_key = "kanban-view"
//! activity_log_capacity = 500
//!
//! [ai]
//! default_eta_seconds = 30
//! sample_image_url = "https://example.com/sample.png"
//! ```

mod error;
mod provider;
mod types;

pub use error::{ConfigError, ConfigResult};
pub use provider::{load_configuration, ConfigProvider, CONFIG_FILE_STEM, ENV_PREFIX};
pub use types::{
    AiConfig, TaskboardConfig, DEFAULT_ACTIVITY_LOG_CAPACITY, DEFAULT_BOARD_SNAPSHOT_KEY,
    DEFAULT_ETA_SECONDS, DEFAULT_VIEW_SNAPSHOT_KEY,
};
