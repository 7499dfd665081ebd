//! Configuration module for wikisource-bot
//!
//! Handles loading and validating settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Find the settings file: `WIKISOURCE_SETTINGS_PATH` first, then the default locations
pub fn settings_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("WIKISOURCE_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    default_paths().into_iter().find(|path| path.exists())
}

/// Load settings from `path` (or defaults), merge the environment and validate
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}

fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/wikisource-bot/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("wikisource-bot/settings.yml"));
    }
    paths
}
