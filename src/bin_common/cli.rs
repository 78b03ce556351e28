//! CLI utilities for binaries
//!
//! Resolves configuration paths from arguments and environment variables.

use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Dashboard configuration (config/dashboard_config.yaml)
    Dashboard,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Dashboard => "config/dashboard_config.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        match self {
            ConfigType::Dashboard => "DASHBOARD_CONFIG_PATH",
            ConfigType::Custom(_) => "DASHBOARD_CONFIG_PATH",
        }
    }

    /// Config type for the first command line argument, if any
    pub fn from_args(args: &[String]) -> Self {
        match args.first() {
            Some(path) if !path.starts_with('-') => ConfigType::Custom(path.clone()),
            _ => ConfigType::Dashboard,
        }
    }
}

/// Load configuration path from environment or use default
///
/// A custom path always wins over the environment.
///
/// # Examples
/// ```
/// use bot_dashboard::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Custom("dash.yaml".to_string()));
/// assert_eq!(path.to_str(), Some("dash.yaml"));
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    if let ConfigType::Custom(path) = &config_type {
        return PathBuf::from(path);
    }
    std::env::var(config_type.env_var_name())
        .unwrap_or_else(|_| config_type.default_path().to_string())
        .into()
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}
