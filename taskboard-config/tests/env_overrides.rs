//! Environment variable precedence tests

use serial_test::serial;
use taskboard_config::{ConfigProvider, TaskboardConfig};
use tempfile::TempDir;

struct EnvGuard(&'static str);

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        std::env::set_var(key, value);
        Self(key)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        std::env::remove_var(self.0);
    }
}

#[test_log::test]
#[serial]
fn test_env_overrides_file() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("taskboard.toml"),
        "[ai]\ndefault_eta_seconds = 5\n",
    )
    .unwrap();
    let _eta = EnvGuard::set("TASKBOARD_AI__DEFAULT_ETA_SECONDS", "12");

    let config = ConfigProvider::new().with_dir(temp.path()).load().unwrap();
    assert_eq!(config.ai.default_eta_seconds, 12);
}

#[test_log::test]
#[serial]
fn test_env_sets_top_level_key() {
    let temp = TempDir::new().unwrap();
    let _key = EnvGuard::set("TASKBOARD_VIEW_SNAPSHOT_KEY", "ops-view");

    let config = ConfigProvider::new().with_dir(temp.path()).load().unwrap();
    assert_eq!(config.view_snapshot_key, "ops-view");
    assert_eq!(
        config.board_snapshot_key,
        TaskboardConfig::default().board_snapshot_key
    );
}

#[test_log::test]
#[serial]
fn test_without_env_ignores_variables() {
    let temp = TempDir::new().unwrap();
    let _capacity = EnvGuard::set("TASKBOARD_ACTIVITY_LOG_CAPACITY", "3");

    let config = ConfigProvider::new()
        .with_dir(temp.path())
        .without_env()
        .load()
        .unwrap();
    assert_eq!(config.activity_log_capacity, 500);
}
