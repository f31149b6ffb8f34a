//! Filter configuration

use serde::{Deserialize, Serialize};

use super::FilterError;
use crate::types::LengthUnit;

/// Small part filter settings for one export run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Whether to filter out small parts
    pub enabled: bool,
    /// Minimum bounding-box diagonal, in `threshold_unit`
    pub threshold_value: f64,
    pub threshold_unit: LengthUnit,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold_value: 5.0,
            threshold_unit: LengthUnit::Millimeters,
        }
    }
}

impl FilterConfig {
    /// Enabled filter with the given threshold
    pub fn enabled(threshold_value: f64, threshold_unit: LengthUnit) -> Self {
        Self {
            enabled: true,
            threshold_value,
            threshold_unit,
        }
    }

    /// Check the threshold is a finite, non-negative number
    pub fn validate(&self) -> Result<(), FilterError> {
        if !self.threshold_value.is_finite() || self.threshold_value < 0.0 {
            return Err(FilterError::InvalidThreshold(self.threshold_value));
        }
        Ok(())
    }

    /// Validated threshold in centimeters
    pub fn threshold_cm(&self) -> Result<f64, FilterError> {
        self.validate()?;
        Ok(self.threshold_unit.to_cm(self.threshold_value))
    }
}
