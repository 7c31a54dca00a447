//! Unit conversion utilities
//!
//! Documents are stored in "storage units", a coordinate system independent of
//! on-screen zoom. One storage unit is a tenth of a millimetre.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of storage units in one millimetre.
pub const STORAGE_UNITS_PER_MM: f64 = 10.0;

const MM_PER_INCH: f64 = 25.4;
const POINTS_PER_INCH: f64 = 72.0;

/// Length unit for user-facing values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Millimetres
    #[default]
    Millimeter,
    /// Inches
    Inch,
    /// PostScript points (1/72 inch)
    Point,
}

impl LengthUnit {
    /// Millimetres per one of this unit.
    fn millimeters(self) -> f64 {
        match self {
            Self::Millimeter => 1.0,
            Self::Inch => MM_PER_INCH,
            Self::Point => MM_PER_INCH / POINTS_PER_INCH,
        }
    }

    /// Converts a value in this unit to storage units.
    pub fn to_storage(self, value: f64) -> f64 {
        value * self.millimeters() * STORAGE_UNITS_PER_MM
    }

    /// Converts storage units to a value in this unit.
    pub fn from_storage(self, storage: f64) -> f64 {
        storage / STORAGE_UNITS_PER_MM / self.millimeters()
    }

    /// Short label ("mm", "in", "pt")
    pub fn label(self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Inch => "in",
            Self::Point => "pt",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mm" | "millimeter" | "millimetre" => Ok(Self::Millimeter),
            "in" | "inch" => Ok(Self::Inch),
            "pt" | "point" => Ok(Self::Point),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

/// Format a storage length for display in the given unit.
pub fn format_length(storage: f64, unit: LengthUnit) -> String {
    format!("{:.3} {}", unit.from_storage(storage), unit.label())
}
