use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use namemap_core::LoadOptions;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub json: bool,
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { json: false, filter: default_log_filter() }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Meta atom written for empty slots by `fmt`.
    pub placeholder: String,
    /// Bind the standard domain when the source domain of `map` is unknown.
    pub fallback_to_standard: bool,
    /// Try the standard domain after the listed targets of `map`.
    pub append_standard: bool,
    pub load: LoadOptions,
    pub log: LogConfig,
    /// File the values came from; `None` when the defaults were used.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            fallback_to_standard: false,
            append_standard: true,
            load: LoadOptions::default(),
            log: LogConfig::default(),
            source: None,
        }
    }
}

impl CliConfig {
    /// Reads `NAMEMAP_CONFIG_PATH` (default `namemap.toml`). A missing file yields
    /// the defaults; a file that does not parse is an error.
    pub fn load() -> anyhow::Result<Self> {
        let path =
            std::env::var("NAMEMAP_CONFIG_PATH").unwrap_or_else(|_| "namemap.toml".to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let mut config: Self = toml::from_str(&text).with_context(|| {
                    format!("failed to parse configuration '{}'", path.display())
                })?;
                config.source = Some(path.to_path_buf());
                Ok(config)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    /// Applies environment overrides on top of the file values.
    pub fn apply_env(mut self) -> Self {
        if let Ok(placeholder) = std::env::var("NAMEMAP_PLACEHOLDER") {
            self.placeholder = placeholder;
        }
        if let Ok(json) = std::env::var("NAMEMAP_LOG_JSON") {
            if let Ok(json) = json.parse::<bool>() {
                self.log.json = json;
            }
        }
        self
    }

    /// Logs where the configuration came from. Call once a subscriber is installed.
    pub fn log_summary(&self) {
        match &self.source {
            Some(path) => info!(
                path = %path.display(),
                placeholder = %self.placeholder,
                json = self.log.json,
                "Configuration ready"
            ),
            None => warn!(
                placeholder = %self.placeholder,
                json = self.log.json,
                "Configuration file not found, using defaults"
            ),
        }
    }
}

fn default_placeholder() -> String {
    "null".to_string()
}

fn default_log_filter() -> String {
    "namemap=info".to_string()
}
