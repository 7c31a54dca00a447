use drawkit_settings::config::parse_hex_color;
use drawkit_settings::Config;
use serde::{Deserialize, Serialize};

use drawkit_core::constants::{DEFAULT_FONT_SIZE, DEFAULT_STROKE_WIDTH};

/// RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Paint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Paint {
    pub const BLACK: Paint = Paint::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(value: &str) -> Option<Self> {
        parse_hex_color(value).map(|[r, g, b, a]| Self { r, g, b, a })
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Stroke and fill appearance of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke: Option<Paint>,
    pub fill: Option<Paint>,
    pub stroke_width: f64,
}

impl Style {
    /// How far the stroke reaches past the geometry.
    pub fn stroke_overhang(&self) -> f64 {
        if self.stroke.is_some() {
            self.stroke_width.max(0.0) / 2.0
        } else {
            0.0
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: Some(Paint::BLACK),
            fill: None,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    /// Size in points.
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "Serif".to_string(),
            size: DEFAULT_FONT_SIZE,
            bold: false,
            italic: false,
        }
    }
}

/// Appearance given to newly constructed objects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleDefaults {
    pub style: Style,
    pub font: Font,
}

impl StyleDefaults {
    pub fn from_config(config: &Config) -> Self {
        let paint = |value: &Option<String>| {
            value.as_deref().and_then(|hex| {
                let paint = Paint::from_hex(hex);
                if paint.is_none() {
                    tracing::warn!("Ignoring invalid colour {hex:?} in settings");
                }
                paint
            })
        };
        Self {
            style: Style {
                stroke: paint(&config.style.stroke),
                fill: paint(&config.style.fill),
                stroke_width: config.style.stroke_width,
            },
            font: Font {
                family: config.font.family.clone(),
                size: config.font.size,
                bold: config.font.bold,
                italic: config.font.italic,
            },
        }
    }
}
