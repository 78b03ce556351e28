use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Environment variable that overrides `server_url`
pub const WS_URL_ENV: &str = "DASHBOARD_WS_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// WebSocket endpoint of the trading bot
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Fixed delay between a closure and the next connection attempt
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,
    #[serde(default)]
    pub history: HistoryConfig,
    /// Starting balance plotted before the first live sample
    #[serde(default)]
    pub seed_balance: Option<f64>,
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Trace output file; the terminal UI owns stdout
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// Caps of the bounded display histories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_trades")]
    pub trades: usize,
    #[serde(default = "default_balance_samples")]
    pub balance_samples: usize,
    #[serde(default = "default_log_entries")]
    pub log_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            trades: default_trades(),
            balance_samples: default_balance_samples(),
            log_entries: default_log_entries(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            reconnect_delay_secs: default_reconnect_delay_secs(),
            history: HistoryConfig::default(),
            seed_balance: None,
            log_level: default_log_level(),
            log_file: default_log_file(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from YAML file
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        let config: DashboardConfig = serde_yaml::from_str(&yaml_content)?;
        config.finish(|key| std::env::var(key).ok())
    }

    /// Load configuration, falling back to defaults when the file does not exist
    pub fn load_or_default(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        if config_path.exists() {
            Self::load(config_path)
        } else {
            info!(
                "Config file {} not found, using defaults",
                config_path.display()
            );
            Self::default().finish(|key| std::env::var(key).ok())
        }
    }

    /// Apply environment overrides, then validate
    fn finish(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        self.apply_env_overrides(lookup);
        self.validate()?;
        Ok(self)
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(WS_URL_ENV).filter(|u| !u.trim().is_empty()) {
            info!("Overriding server URL from environment variable");
            self.server_url = url;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !(self.server_url.starts_with("ws://") || self.server_url.starts_with("wss://")) {
            return Err(ConfigError::ValidationError(format!(
                "server_url must start with ws:// or wss:// (got '{}')",
                self.server_url
            )));
        }

        if self.reconnect_delay_secs == 0 {
            return Err(ConfigError::ValidationError(
                "reconnect_delay_secs must be greater than 0".to_string(),
            ));
        }

        let caps = [
            ("history.trades", self.history.trades),
            ("history.balance_samples", self.history.balance_samples),
            ("history.log_entries", self.history.log_entries),
        ];
        for (name, cap) in caps {
            if cap == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be greater than 0",
                    name
                )));
            }
        }

        if let Some(balance) = self.seed_balance {
            if !balance.is_finite() {
                return Err(ConfigError::ValidationError(
                    "seed_balance must be a finite number".to_string(),
                ));
            }
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration loaded:");
        info!("  Server URL: {}", self.server_url);
        info!("  Reconnect delay: {} seconds", self.reconnect_delay_secs);
        info!(
            "  History caps: {} trades, {} balance samples, {} log entries",
            self.history.trades, self.history.balance_samples, self.history.log_entries
        );
        match self.seed_balance {
            Some(balance) => info!("  Seed balance: {:.2}", balance),
            None => info!("  Seed balance: none"),
        }
        info!("  Log level: {}", self.log_level);
        info!("  Log file: {}", self.log_file);
    }
}

fn default_server_url() -> String {
    "ws://localhost:8765".to_string()
}

fn default_reconnect_delay_secs() -> u64 {
    5
}

fn default_trades() -> usize {
    100
}

fn default_balance_samples() -> usize {
    50
}

fn default_log_entries() -> usize {
    200
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/dashboard.log".to_string()
}
