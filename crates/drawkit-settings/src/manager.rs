//! Settings manager: locates, loads and saves the editor configuration.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Result, SettingsError};

const APP_DIR: &str = "drawkit";
const CONFIG_FILE: &str = "settings.toml";

/// Owns the active configuration and the file it came from.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config: Config,
    path: PathBuf,
}

impl SettingsManager {
    /// Platform configuration directory for drawkit.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| SettingsError::NoSettingsDir("no config directory".to_string()))
    }

    /// Default location of the settings file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Creates the configuration directory if it does not exist.
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Loads settings from the default location.
    pub fn load_default() -> Result<Self> {
        Self::load_or_default(&Self::config_file_path()?)
    }

    /// Loads settings from `path`, falling back to defaults when the file is missing.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            Config::load_from_file(path)?
        } else {
            tracing::info!("No settings at {}, using defaults", path.display());
            Config::default()
        };
        Ok(Self {
            config,
            path: path.to_path_buf(),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the active configuration.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// File the configuration is saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validates and writes the configuration back to its file.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.config.save_to_file(&self.path)?;
        tracing::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
