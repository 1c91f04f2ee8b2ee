mod init;
mod schema;

pub use init::write_default_config;
pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::shipping::{validate_rates, RateConfiguration};

/// Get the config directory path (~/.config/ship-fee/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("ship-fee"))
}

/// Get the default config file path (~/.config/ship-fee/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Get the default user store path (~/.config/ship-fee/users.json)
pub fn get_users_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("users.json"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/ship-fee/config.yaml)
///
/// A missing default file yields the built-in defaults. A missing explicit
/// file is an error.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        debug!("no config at {}, using built-in rates", config_path.display());
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    debug!("loaded config from {}", config_path.display());
    Ok(config)
}

impl Config {
    /// Validate the rate section and build the effective rate configuration.
    ///
    /// On failure returns every validation problem, not just the first.
    pub fn rate_configuration(&self) -> Result<RateConfiguration, Vec<String>> {
        let Some(ref rates) = self.rates else {
            return Ok(RateConfiguration::new());
        };
        validate_rates(rates)?;
        rates.build().map_err(|e| vec![e.to_string()])
    }

    /// Resolve the user store path, falling back to the default location
    pub fn users_path(&self) -> Result<PathBuf> {
        match self.users_file {
            Some(ref p) => Ok(p.clone()),
            None => get_users_path(),
        }
    }
}
