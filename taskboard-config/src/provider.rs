//! Configuration provider using Figment

use crate::error::{ConfigError, ConfigResult};
use crate::types::TaskboardConfig;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Base name of configuration files
pub const CONFIG_FILE_STEM: &str = "taskboard";

/// Environment variable prefix; nested keys are split on `__`
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// Loads [`TaskboardConfig`] from defaults, config files and the environment.
///
/// Sources are merged in precedence order (later overrides earlier):
/// 1. Built-in defaults
/// 2. `taskboard.{toml,yaml,yml,json}` in each search directory, in order
/// 3. Explicit file passed with [`ConfigProvider::with_file`]
/// 4. `TASKBOARD_*` environment variables
///
/// Nothing is cached; every [`ConfigProvider::load`] reads fresh.
#[derive(Debug, Default, Clone)]
pub struct ConfigProvider {
    search_dirs: Vec<PathBuf>,
    explicit_file: Option<PathBuf>,
    skip_env: bool,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory searched for `taskboard.*` files
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    /// Load one specific file; it must exist
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    /// Ignore `TASKBOARD_*` environment variables
    pub fn without_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Build, extract and validate the configuration
    pub fn load(&self) -> ConfigResult<TaskboardConfig> {
        let figment = self.build_figment()?;
        let config: TaskboardConfig = figment.extract()?;
        config.validate()?;
        debug!(
            storage_dir = %config.storage_dir.display(),
            board_key = %config.board_snapshot_key,
            "loaded taskboard configuration"
        );
        Ok(config)
    }

    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(TaskboardConfig::default()));

        for dir in &self.search_dirs {
            for path in discover_files(dir) {
                trace!("Loading config file: {}", path.display());
                figment = merge_file(figment, &path);
            }
        }

        if let Some(path) = &self.explicit_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound { path: path.clone() });
            }
            figment = merge_file(figment, path);
        }

        if !self.skip_env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        Ok(figment)
    }
}

/// Config files present in `dir`, lowest precedence first
fn discover_files(dir: &Path) -> Vec<PathBuf> {
    ["json", "yaml", "yml", "toml"]
        .iter()
        .map(|ext| dir.join(format!("{CONFIG_FILE_STEM}.{ext}")))
        .filter(|path| path.is_file())
        .collect()
}

fn merge_file(figment: Figment, path: &Path) -> Figment {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
        Some("json") => figment.merge(Json::file(path)),
        _ => figment.merge(Toml::file(path)),
    }
}

/// Load configuration from `dir` plus the environment
pub fn load_configuration(dir: impl Into<PathBuf>) -> ConfigResult<TaskboardConfig> {
    ConfigProvider::new().with_dir(dir).load()
}
