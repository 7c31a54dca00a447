//! Configuration for the drawkit editor
//!
//! Configuration is organized into logical sections:
//! - Editor behaviour (pick tolerances, history depth)
//! - Style defaults applied to newly constructed objects
//! - Font defaults applied to newly constructed text
//! - Background grid

use drawkit_core::constants::{
    DEFAULT_FONT_SIZE, DEFAULT_HISTORY_LIMIT, DEFAULT_HIT_TOLERANCE, DEFAULT_HOTSPOT_TOLERANCE,
    DEFAULT_STROKE_WIDTH,
};
use drawkit_core::units::LengthUnit;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, Result};

/// Editor behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Pick tolerance around object bounding boxes (storage units)
    pub hit_tolerance: f64,
    /// Distance within which a resize handle is picked (storage units)
    pub hotspot_tolerance: f64,
    /// Maximum number of undo entries
    pub history_limit: usize,
    /// Unit used for user-facing lengths
    pub display_unit: LengthUnit,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            hotspot_tolerance: DEFAULT_HOTSPOT_TOLERANCE,
            history_limit: DEFAULT_HISTORY_LIMIT,
            display_unit: LengthUnit::Millimeter,
        }
    }
}

/// Style defaults for new objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    /// Stroke colour as `#RRGGBB[AA]`, `None` for no stroke
    pub stroke: Option<String>,
    /// Fill colour as `#RRGGBB[AA]`, `None` for no fill
    pub fill: Option<String>,
    /// Stroke width (storage units)
    pub stroke_width: f64,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            stroke: Some("#000000".to_string()),
            fill: None,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

/// Font defaults for new text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    /// Font family name
    pub family: String,
    /// Size in points
    pub size: f64,
    /// Bold face
    pub bold: bool,
    /// Italic face
    pub italic: bool,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            family: "Serif".to_string(),
            size: DEFAULT_FONT_SIZE,
            bold: false,
            italic: false,
        }
    }
}

/// Background grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Whether the grid is drawn
    pub visible: bool,
    /// Grid spacing in millimetres
    pub spacing_mm: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            spacing_mm: 5.0,
        }
    }
}

impl GridSettings {
    /// Grid spacing converted to storage units.
    pub fn spacing_storage(&self) -> f64 {
        LengthUnit::Millimeter.to_storage(self.spacing_mm)
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Editor behaviour
    pub editor: EditorSettings,
    /// Style defaults
    pub style: StyleSettings,
    /// Font defaults
    pub font: FontSettings,
    /// Background grid
    pub grid: GridSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()).into());
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()).into());
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        positive("editor.hit_tolerance", self.editor.hit_tolerance)?;
        positive("editor.hotspot_tolerance", self.editor.hotspot_tolerance)?;
        if self.editor.history_limit == 0 {
            return Err(ConfigError::OutOfRange {
                key: "editor.history_limit".to_string(),
                value: "0".to_string(),
            });
        }

        if let Some(stroke) = &self.style.stroke {
            color("style.stroke", stroke)?;
        }
        if let Some(fill) = &self.style.fill {
            color("style.fill", fill)?;
        }
        if self.style.stroke_width < 0.0 || !self.style.stroke_width.is_finite() {
            return Err(ConfigError::OutOfRange {
                key: "style.stroke_width".to_string(),
                value: self.style.stroke_width.to_string(),
            });
        }

        positive("font.size", self.font.size)?;
        positive("grid.spacing_mm", self.grid.spacing_mm)?;
        Ok(())
    }
}

fn positive(key: &str, value: f64) -> std::result::Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

fn color(key: &str, value: &str) -> std::result::Result<(), ConfigError> {
    parse_hex_color(value)
        .map(|_| ())
        .ok_or_else(|| ConfigError::InvalidColor {
            key: key.to_string(),
            value: value.to_string(),
        })
}

/// Parses `#RRGGBB` or `#RRGGBBAA` into RGBA bytes.
pub fn parse_hex_color(value: &str) -> Option<[u8; 4]> {
    let hex = value.strip_prefix('#')?;
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let alpha = if hex.len() == 8 { byte(6)? } else { 255 };
    Some([byte(0)?, byte(2)?, byte(4)?, alpha])
}
