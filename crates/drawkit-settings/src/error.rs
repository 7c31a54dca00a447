//! Settings errors: persistence failures and rejected values.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    /// No per-user config location on this platform.
    #[error("No settings directory: {0}")]
    NoSettingsDir(String),

    #[error("Settings I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML settings: {0}")]
    TomlRead(#[from] toml::de::Error),

    #[error("Could not write TOML settings: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("Invalid settings: {0}")]
    Config(#[from] ConfigError),
}

/// A settings value that loaded but cannot be used.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// Settings files are `.toml` or `.json`.
    #[error("Settings file must be .toml or .json: {0}")]
    UnsupportedFormat(String),

    #[error("'{key}' = {value} is outside the accepted range")]
    OutOfRange { key: String, value: String },

    /// Colours are `#RRGGBB` or `#RRGGBBAA`.
    #[error("'{key}' = {value} is not a colour")]
    InvalidColor { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, SettingsError>;
