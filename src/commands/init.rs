use crate::config::{CovtreeConfig, CONFIG_FILE_NAME};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Write a default configuration file into the working directory.
pub fn init_config(force: bool) -> Result<()> {
    let dir = std::env::current_dir().context("Failed to get current directory")?;
    let path = init_config_in(&dir, force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let body = toml::to_string_pretty(&CovtreeConfig::default())
        .context("Failed to serialize default configuration")?;
    let contents = format!("# covtree configuration\n\n{}", body);
    fs::write(&config_path, contents)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(config_path)
}
