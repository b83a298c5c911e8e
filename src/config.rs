use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::preset::{DEFAULT_PRESET, PresetConfig};
use crate::publisher::DEFAULT_INTERVAL;
use crate::transport::DEFAULT_PUBLISH_URL;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub publisher: PublisherConfig,
    pub presets: HashMap<String, PresetConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    pub url: String,
    pub interval_ms: u64,
    pub timeout_ms: u64,
    pub preset: String,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_PUBLISH_URL.to_string(),
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            timeout_ms: 30000,
            preset: DEFAULT_PRESET.to_string(),
        }
    }
}

impl PublisherConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            publisher: PublisherConfig::default(),
            presets: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Apply command-line overrides on top of file/default values
    pub fn with_overrides(mut self, preset: Option<&str>, url: Option<&str>, interval_secs: Option<u64>) -> Self {
        if let Some(preset) = preset {
            self.publisher.preset = preset.to_string();
        }
        if let Some(url) = url {
            self.publisher.url = url.to_string();
        }
        if let Some(secs) = interval_secs {
            self.publisher.interval_ms = secs.saturating_mul(1000);
        }
        self
    }

    /// Configured log level, if any
    pub fn log_level_filter(&self) -> Result<Option<log::LevelFilter>> {
        match self.log_level.as_deref() {
            None => Ok(None),
            Some(level) => level
                .parse::<log::LevelFilter>()
                .map(Some)
                .map_err(|_| eyre::eyre!("log_level must be one of off, error, warn, info, debug, trace (got {})", level)),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.log_level_filter()?;
        if self.publisher.url.trim().is_empty() {
            eyre::bail!("publisher.url must not be empty");
        }
        if self.publisher.interval_ms == 0 {
            eyre::bail!("publisher.interval_ms must be > 0");
        }
        if self.publisher.timeout_ms == 0 {
            eyre::bail!("publisher.timeout_ms must be > 0");
        }
        Ok(())
    }
}
