//! drawkit Settings Crate
//!
//! Handles editor configuration (pick tolerances, history depth, style and font
//! defaults, background grid) and its persistence as TOML or JSON.

pub mod config;
pub mod error;
pub mod manager;

pub use config::{Config, EditorSettings, FontSettings, GridSettings, StyleSettings};
pub use error::{ConfigError, SettingsError};
pub use manager::SettingsManager;
