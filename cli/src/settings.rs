//! Layered settings for the host client and logging.
//!
//! Layers, lowest precedence first:
//! 1. built-in defaults
//! 2. an optional TOML file passed with `--settings`
//! 3. `PRGATE_` environment variables, `__` separating nested keys
//!    (e.g. `PRGATE_GITHUB__API_URL`)

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use prgate_host_client::{DEFAULT_API_URL, GitHubConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings file not found at path: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to encode default settings: {0}")]
    Defaults(#[from] serde_json::Error),

    #[error("Invalid settings value: {0}")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub github: GitHubSettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubSettings {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_user_agent() -> String {
    concat!("prgate/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Settings {
    /// Host client configuration; the token comes from the command line.
    pub fn github_config(&self, token: Option<String>) -> GitHubConfig {
        GitHubConfig {
            api_url: self.github.api_url.clone(),
            token,
            user_agent: self.github.user_agent.clone(),
            timeout: Duration::from_secs(self.github.timeout_secs),
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.github.api_url.trim().is_empty() {
            return Err(SettingsError::Invalid("github.api_url is empty".to_string()));
        }
        if self.github.timeout_secs == 0 {
            return Err(SettingsError::Invalid(
                "github.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load settings from defaults, `path` and the environment.
pub fn load(path: Option<&Path>) -> Result<Settings, SettingsError> {
    let defaults = serde_json::to_string(&Settings::default())?;
    let mut builder =
        Config::builder().add_source(File::from_str(&defaults, config::FileFormat::Json));

    if let Some(path) = path {
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }
        builder = builder.add_source(File::from(path).format(config::FileFormat::Toml));
    }

    builder = builder.add_source(
        Environment::with_prefix("PRGATE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}
