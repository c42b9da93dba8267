use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use engine_logging::LogDestination;
use medialink_engine::InferenceSettings;
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "medialink";
const CONFIG_FILENAME: &str = "config.ron";
pub const LOG_FILENAME: &str = "medialink.log";

#[derive(Parser, Debug)]
#[command(name = "medialink", about = "Generate Medialister catalog links from a description")]
pub struct Args {
    /// Path to a config.ron file (defaults to the platform config directory).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Keep the verification flag and saved input in memory only; the state file
    /// is neither read nor written. Config and log files are still used.
    #[arg(long)]
    pub ephemeral: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogTarget {
    #[default]
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub data_dir: Option<PathBuf>,
    pub log: LogTarget,
}

impl Default for AppConfig {
    fn default() -> Self {
        let inference = InferenceSettings::default();
        Self {
            api_base_url: inference.base_url,
            api_key_env: "OPENAI_API_KEY".to_string(),
            connect_timeout_secs: inference.connect_timeout.as_secs(),
            request_timeout_secs: inference.request_timeout.map(|t| t.as_secs()),
            data_dir: None,
            log: LogTarget::default(),
        }
    }
}

/// Config plus anything worth logging once the logger is up.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl AppConfig {
    /// Loads `explicit` or the default config file, falling back to defaults.
    ///
    /// Never fails: a missing default file is silent, everything else becomes
    /// a warning.
    pub fn load(explicit: Option<&Path>) -> LoadedConfig {
        let mut warnings = Vec::new();
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };
        let Some(path) = path else {
            warnings.push("No config directory on this platform; using defaults".to_string());
            return LoadedConfig {
                config: AppConfig::default(),
                source: None,
                warnings,
            };
        };

        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
                return LoadedConfig {
                    config: AppConfig::default(),
                    source: None,
                    warnings,
                };
            }
            Err(err) => {
                warnings.push(format!("Failed to read config from {:?}: {}", path, err));
                return LoadedConfig {
                    config: AppConfig::default(),
                    source: None,
                    warnings,
                };
            }
        };

        match parse_config(&content) {
            Ok(config) => LoadedConfig {
                config,
                source: Some(path),
                warnings,
            },
            Err(err) => {
                warnings.push(format!("Failed to parse config from {:?}: {}", path, err));
                LoadedConfig {
                    config: AppConfig::default(),
                    source: None,
                    warnings,
                }
            }
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR)))
            .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR))
    }

    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn inference_settings(&self, api_key: Option<String>) -> InferenceSettings {
        InferenceSettings {
            base_url: self.api_base_url.clone(),
            api_key,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ron::error::SpannedError> {
    ron::from_str(content)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}
