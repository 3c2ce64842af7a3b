use crate::config::ApimapConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

const CONFIG_HEADER: &str = "\
# Apimap configuration.
#
# Generated with the built-in policy tables. Every table can be edited;
# tables removed from this file fall back to the built-in defaults.

";

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(".apimap.toml");

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let defaults = toml::to_string_pretty(&ApimapConfig::default())
        .context("failed to serialize default configuration")?;
    fs::write(&config_path, format!("{CONFIG_HEADER}{defaults}"))
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    println!("Created .apimap.toml configuration file");

    Ok(())
}
