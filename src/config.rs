use crate::channels::slack::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const CONFIG_ENV: &str = "SLACK_RESOURCE_CONFIG";
pub const API_URL_ENV: &str = "SLACK_RESOURCE_API_URL";
pub const UPLOAD_FILENAME_ENV: &str = "SLACK_RESOURCE_UPLOAD_FILENAME";
pub const LOG_ENV: &str = "SLACK_RESOURCE_LOG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub slack: SlackConfig,
    pub upload: UploadConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    pub api_url: String,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Filename used for inline-content uploads that do not name one.
    pub default_filename: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            default_filename: "upload.txt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

pub fn resolve_config_path() -> Option<PathBuf> {
    env::var(CONFIG_ENV)
        .ok()
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from)
}

/// Defaults, then the optional JSON file, then environment overrides.
/// An unreadable or malformed file is ignored.
pub fn load_config() -> Config {
    let mut cfg = Config::default();

    if let Some(path) = resolve_config_path() {
        if let Ok(raw) = fs::read_to_string(&path) {
            if let Ok(file_cfg) = serde_json::from_str::<Config>(&raw) {
                cfg = file_cfg;
            }
        }
    }

    apply_env_overrides(&mut cfg, |name| env::var(name).ok());
    cfg
}

pub fn apply_env_overrides(cfg: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(url) = non_blank(API_URL_ENV) {
        cfg.slack.api_url = url;
    }

    if let Some(name) = non_blank(UPLOAD_FILENAME_ENV) {
        cfg.upload.default_filename = name;
    }

    if let Some(filter) = non_blank(LOG_ENV) {
        cfg.log.filter = filter;
    }
}
