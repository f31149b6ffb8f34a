//! Length units accepted for the size threshold

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::filter::FilterError;

/// Length unit for user-facing sizes
///
/// Assembly geometry is stored in centimeters, so every user value is
/// converted with [`LengthUnit::to_cm`] before it is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "m")]
    Meters,
}

impl LengthUnit {
    /// Convert a value in this unit to centimeters
    pub fn to_cm(self, value: f64) -> f64 {
        match self {
            LengthUnit::Millimeters => value / 10.0,
            LengthUnit::Centimeters => value,
            LengthUnit::Meters => value * 100.0,
        }
    }

    /// Short symbol used in configuration files and on the command line
    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Millimeters => "mm",
            LengthUnit::Centimeters => "cm",
            LengthUnit::Meters => "m",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mm" => Ok(LengthUnit::Millimeters),
            "cm" => Ok(LengthUnit::Centimeters),
            "m" => Ok(LengthUnit::Meters),
            other => Err(FilterError::InvalidUnit(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_millimeters_is_half_a_centimeter() {
        assert_eq!(LengthUnit::Millimeters.to_cm(5.0), 0.5);
        assert_eq!(LengthUnit::Centimeters.to_cm(0.5), 0.5);
        assert_eq!(LengthUnit::Meters.to_cm(0.005), 0.5);
    }

    #[test]
    fn test_parse_symbols() {
        for unit in [
            LengthUnit::Millimeters,
            LengthUnit::Centimeters,
            LengthUnit::Meters,
        ] {
            assert_eq!(unit.symbol().parse::<LengthUnit>().unwrap(), unit);
        }
        assert_eq!(" cm ".parse::<LengthUnit>().unwrap(), LengthUnit::Centimeters);
    }

    #[test]
    fn test_parse_rejects_unknown_unit() {
        let err = "inch".parse::<LengthUnit>().unwrap_err();
        assert!(matches!(err, FilterError::InvalidUnit(ref u) if u == "inch"));
        assert!("MM".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_serde_uses_symbols() {
        let text = ron::to_string(&LengthUnit::Meters).unwrap();
        assert_eq!(text, "m");
        assert_eq!(ron::from_str::<LengthUnit>("cm").unwrap(), LengthUnit::Centimeters);
        assert!(ron::from_str::<LengthUnit>("ft").is_err());
        assert_eq!(serde_json::to_string(&LengthUnit::Millimeters).unwrap(), "\"mm\"");
    }
}
