//! Configuration management for bitdef CLI

use anyhow::{Context, Result};
use bitdef::StoreConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the definitions file
    pub store_dir: Option<PathBuf>,

    /// Definitions file name inside `store_dir`
    pub file_name: Option<String>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("bitdef");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Store location with configured values applied over the defaults
    pub fn store_config(&self) -> StoreConfig {
        let mut store = StoreConfig::default();
        if let Some(dir) = &self.store_dir {
            store.root = dir.clone();
        }
        if let Some(name) = &self.file_name {
            store.file_name = name.clone();
        }
        store
    }

    pub fn set_store_dir(&mut self, dir: PathBuf) {
        self.store_dir = Some(dir);
    }

    pub fn set_file_name(&mut self, file_name: String) {
        self.file_name = Some(file_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_store_config() {
        let config = Config::default();
        assert_eq!(config.store_config(), StoreConfig::default());
    }

    #[test]
    fn test_store_config_overrides() {
        let mut config = Config::default();
        config.set_store_dir(PathBuf::from("/tmp/defs"));
        config.set_file_name("errors.json".to_string());

        assert_eq!(
            config.store_config().path(),
            PathBuf::from("/tmp/defs/errors.json")
        );
    }

    #[test]
    fn test_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set_file_name("errors.json".to_string());
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_is_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "store_dir = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
