//! Config command handlers

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use linksaver_core::Config;

use crate::output::Output;

/// Show current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load()?;

    match output.format {
        crate::output::OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        _ => {
            println!("Config file:    {}", Config::config_file_path().display());
            println!("data_dir:       {}", config.data_dir.display());
            println!("auto_tag:       {}", config.auto_tag);
            println!("fetch_metadata: {}", config.fetch_metadata);
        }
    }
    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load()?;

    match key.as_str() {
        "data_dir" => config.data_dir = PathBuf::from(&value),
        "auto_tag" => config.auto_tag = parse_bool(&value)?,
        "fetch_metadata" => config.fetch_metadata = parse_bool(&value)?,
        _ => bail!(
            "Unknown config key: {} (expected data_dir, auto_tag, or fetch_metadata)",
            key
        ),
    }

    config.save().context("Failed to save config")?;
    output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => bail!("Expected a boolean value, got: {}", value),
    }
}
