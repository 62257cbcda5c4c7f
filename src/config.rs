//! Configuration management for the recruiter bot

use crate::error::{RecruiterBotError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable checked when `service.api_key_env` is not set.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub api_key_env: String,
    /// No timeout when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub color_output: bool,
    pub export_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("recruiter-bot");

        Self {
            service: ServiceConfig {
                endpoint: "https://generativelanguage.googleapis.com".to_string(),
                model: "gemini-2.5-flash".to_string(),
                temperature: 0.2,
                api_key_env: "GEMINI_API_KEY".to_string(),
                timeout_secs: None,
            },
            storage: StorageConfig { data_dir },
            output: OutputConfig {
                color_output: true,
                export_dir: PathBuf::from("."),
            },
        }
    }
}

impl Config {
    /// Load from `path`, writing defaults there on first run.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| RecruiterBotError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RecruiterBotError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("recruiter-bot")
            .join("config.toml")
    }

    pub fn data_dir(&self) -> &Path {
        &self.storage.data_dir
    }

    /// Resolve the API key from the environment.
    ///
    /// The configured variable wins; `API_KEY` is the fallback. Blank values
    /// count as missing.
    pub fn api_key(&self) -> Result<String> {
        self.api_key_with_fallback(FALLBACK_API_KEY_ENV)
    }

    fn api_key_with_fallback(&self, fallback_env: &str) -> Result<String> {
        [self.service.api_key_env.as_str(), fallback_env]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                RecruiterBotError::Configuration(format!(
                    "Missing {} environment variable",
                    self.service.api_key_env
                ))
            })
    }
}
