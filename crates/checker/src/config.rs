// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checker configuration
//!
//! Loaded from `~/.config/powny-cli/config.toml` unless a path is given.
//! `logging` and `output` are handed on to their consumers as-is.

use powny_rules::DEFAULT_ENTRY_POINT;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config written by `powny create-config`
pub const DEFAULT_CONFIG: &str = r#"# powny-cli configuration

# Rules repository checked by `powny check`
# rules-path = "~/src/powny-rules"

# Handler names collected from every rule module
entry-points = ["on_event"]

[logging]
level = "info"
format = "text"

# Output channels available to `notify` steps. Notifications are captured
# and logged during a local check, never delivered.
[output.email]
server = "localhost"
"#;

/// Errors from loading or writing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("config {0} already exists")]
    AlreadyExists(PathBuf),
    #[error("cannot determine the user config directory")]
    NoConfigDir,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `powny_checker=debug`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CheckConfig {
    pub rules_path: Option<PathBuf>,
    pub entry_points: Vec<String>,
    pub recursive: bool,
    pub logging: LoggingConfig,
    pub output: Value,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            rules_path: None,
            entry_points: vec![DEFAULT_ENTRY_POINT.to_string()],
            recursive: true,
            logging: LoggingConfig::default(),
            output: Value::Object(serde_json::Map::new()),
        }
    }
}

impl CheckConfig {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.rules_path = config.rules_path.map(|p| expand_home(&p));
        Ok(config)
    }

    /// `~/.config/powny-cli/config.toml` (platform config dir)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("powny-cli").join("config.toml"))
    }

    /// Load `explicit` if given, else the default file when it exists,
    /// else built-in defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Write [`DEFAULT_CONFIG`] to `path`, refusing to overwrite unless `force`
pub fn write_default_config(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        tracing::warn!(path = %path.display(), "config already exists, rewriting");
    }
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG).map_err(io_err)?;
    tracing::info!(path = %path.display(), "config created");
    Ok(())
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
