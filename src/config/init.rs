use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{get_config_path, Config};
use crate::shipping::RatesConfig;

const HEADER: &str = "\
# ship-fee configuration
#
# rates.international: per-kg rates by zone; only the \"International\" key is used for quotes
# rates.discounts: extra discount codes as fractions between 0 and 1
";

/// Render the default config file contents
fn render_default_config() -> Result<String> {
    let config = Config {
        rates: Some(RatesConfig::defaults()),
        users_file: None,
    };
    let yaml = serde_saphyr::to_string(&config).context("Failed to serialize default config")?;
    Ok(format!("{}{}", HEADER, yaml))
}

/// Write the default config file.
///
/// If `path` is None, writes to ~/.config/ship-fee/config.yaml.
/// Refuses to replace an existing file unless `force` is set.
pub fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite",
            config_path.display()
        );
    }

    ensure_parent_dir(&config_path)?;

    let contents = render_default_config()?;
    let mut file = AtomicWriteFile::open(&config_path)
        .with_context(|| format!("Failed to open atomic write file at {}", config_path.display()))?;
    file.write_all(contents.as_bytes())
        .context("Failed to write config file")?;
    file.commit().context("Failed to save config file")?;

    info!("wrote default config to {}", config_path.display());
    Ok(config_path)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
        }
    }
    Ok(())
}
