//! Strongly typed taskboard settings

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default snapshot key for the task/column collection
pub const DEFAULT_BOARD_SNAPSHOT_KEY: &str = "kanban-board";

/// Default snapshot key for view preferences
pub const DEFAULT_VIEW_SNAPSHOT_KEY: &str = "kanban-view";

/// Default number of activity entries kept in memory
pub const DEFAULT_ACTIVITY_LOG_CAPACITY: usize = 500;

/// Default simulated run duration in seconds
pub const DEFAULT_ETA_SECONDS: u32 = 30;

/// Top-level configuration for the kanban core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskboardConfig {
    /// Directory holding persisted snapshots
    pub storage_dir: PathBuf,
    /// Snapshot key for tasks + columns
    pub board_snapshot_key: String,
    /// Snapshot key for view preferences
    pub view_snapshot_key: String,
    /// Maximum number of activity entries retained (newest kept)
    pub activity_log_capacity: usize,
    /// AI run simulation settings
    pub ai: AiConfig,
}

impl Default for TaskboardConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".taskboard"),
            board_snapshot_key: DEFAULT_BOARD_SNAPSHOT_KEY.to_string(),
            view_snapshot_key: DEFAULT_VIEW_SNAPSHOT_KEY.to_string(),
            activity_log_capacity: DEFAULT_ACTIVITY_LOG_CAPACITY,
            ai: AiConfig::default(),
        }
    }
}

impl TaskboardConfig {
    /// Reject values the store cannot work with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.board_snapshot_key.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "board_snapshot_key",
                "must not be empty",
            ));
        }
        if self.view_snapshot_key.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "view_snapshot_key",
                "must not be empty",
            ));
        }
        if self.board_snapshot_key == self.view_snapshot_key {
            return Err(ConfigError::invalid_value(
                "view_snapshot_key",
                "must differ from board_snapshot_key",
            ));
        }
        self.ai.validate()
    }
}

/// Settings for the time-simulated AI execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// ETA assigned on run/retry when the workflow declares none
    pub default_eta_seconds: u32,
    /// Image attached to successful runs that produced none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_image_url: Option<String>,
    /// Markdown attached to successful runs; `{title}` and `{workflow}` are substituted
    pub sample_markdown_template: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            default_eta_seconds: DEFAULT_ETA_SECONDS,
            sample_image_url: None,
            sample_markdown_template: "## {title}\n\nCompleted by workflow `{workflow}`."
                .to_string(),
        }
    }
}

impl AiConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.default_eta_seconds == 0 {
            return Err(ConfigError::invalid_value(
                "ai.default_eta_seconds",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Render the sample markdown for a finished task
    pub fn render_sample_markdown(&self, title: &str, workflow: &str) -> String {
        self.sample_markdown_template
            .replace("{title}", title)
            .replace("{workflow}", workflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TaskboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.board_snapshot_key, "kanban-board");
        assert_eq!(config.view_snapshot_key, "kanban-view");
    }

    #[test]
    fn test_zero_eta_rejected() {
        let mut config = TaskboardConfig::default();
        config.ai.default_eta_seconds = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ai.default_eta_seconds"));
    }

    #[test]
    fn test_same_keys_rejected() {
        let config = TaskboardConfig {
            view_snapshot_key: DEFAULT_BOARD_SNAPSHOT_KEY.to_string(),
            ..TaskboardConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_render_sample_markdown() {
        let ai = AiConfig::default();
        let md = ai.render_sample_markdown("Call leads", "outreach");
        assert_eq!(md, "## Call leads\n\nCompleted by workflow `outreach`.");
    }
}
