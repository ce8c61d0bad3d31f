//! Persistent watcher preferences.
//!
//! Stored as versioned JSON next to the log file. Loading falls back to
//! defaults when the file is missing; saving is atomic (temp file + rename).

use crate::error::config::ConfigError;

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "watch.json";
const CONFIG_VERSION: u32 = 1;

const MIN_PUMP_INTERVAL_MS: u64 = 16;
const MAX_PUMP_INTERVAL_MS: u64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderPrefs {
    /// How often the consumer loop drains the notice queue.
    #[serde(default = "default_pump_interval_ms")]
    pub pump_interval_ms: u64,

    /// Query this owner instead of the current local actor.
    pub owner_override: Option<u64>,
}

impl Default for ProviderPrefs {
    fn default() -> Self {
        Self {
            pump_interval_ms: default_pump_interval_ms(),
            owner_override: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorPrefs {
    /// How long the demo provider waits before announcing itself. Non-zero
    /// values exercise the late-registration path.
    #[serde(default = "default_availability_delay_ms")]
    pub availability_delay_ms: u64,

    /// Interval between simulated item events.
    #[serde(default = "default_emit_interval_ms")]
    pub emit_interval_ms: u64,
}

impl Default for SimulatorPrefs {
    fn default() -> Self {
        Self {
            availability_delay_ms: default_availability_delay_ms(),
            emit_interval_ms: default_emit_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub provider: ProviderPrefs,

    #[serde(default)]
    pub simulator: SimulatorPrefs,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            provider: ProviderPrefs::default(),
            simulator: SimulatorPrefs::default(),
        }
    }
}

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_pump_interval_ms() -> u64 {
    250
}
fn default_availability_delay_ms() -> u64 {
    2_000
}
fn default_emit_interval_ms() -> u64 {
    1_500
}

impl WatchConfig {
    /// Load config from `{config_dir}/watch.json`.
    ///
    /// A missing file yields defaults; a present-but-broken file is an
    /// error, so a typo never silently resets preferences.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {e}");
            ConfigError::read(&config_path, e)
        })?;

        let config: WatchConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {e}");
            ConfigError::parse(&config_path, e.to_string())
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to `{config_dir}/watch.json` using temp file + rename.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir)
            .map_err(|e| ConfigError::write(config_dir, e))?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{CONFIG_FILE_NAME}.tmp"));

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::serialize(e.to_string()))?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::write(&temp_path, e))?;

        std::fs::rename(&temp_path, &config_path)
            .map_err(|e| ConfigError::write(&config_path, e))?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::validation(format!(
                "Invalid version: {} (expected 1-{CONFIG_VERSION})",
                self.version
            )));
        }

        if self.provider.pump_interval_ms < MIN_PUMP_INTERVAL_MS
            || self.provider.pump_interval_ms > MAX_PUMP_INTERVAL_MS
        {
            return Err(ConfigError::validation(format!(
                "Invalid pump interval: {}ms (must be {MIN_PUMP_INTERVAL_MS}-{MAX_PUMP_INTERVAL_MS})",
                self.provider.pump_interval_ms
            )));
        }

        if self.simulator.emit_interval_ms == 0 {
            return Err(ConfigError::validation(
                "Simulator emit interval cannot be zero".to_string(),
            ));
        }

        Ok(())
    }
}
