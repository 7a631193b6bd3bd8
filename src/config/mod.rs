mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::scoring::policy::EventRegistry;

/// Get the config directory path (~/.config/cuberank/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("cuberank")
}

/// Get the default config file path (~/.config/cuberank/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Build the event registry, applying config overrides when present.
///
/// An explicitly passed `path` must exist. The default path is optional:
/// without a config file the built-in event table applies unchanged.
pub fn load_registry(path: Option<PathBuf>) -> Result<EventRegistry> {
    let (config_path, explicit) = match path {
        Some(p) => (p, true),
        None => (get_config_path(), false),
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(EventRegistry::default());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;
    let config: Config = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    let mut registry = EventRegistry::default();
    for (event, policy) in config.events {
        registry.set(event, policy);
    }
    Ok(registry)
}
