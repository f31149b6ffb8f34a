//! Exporter configuration
//!
//! Settings persisted between runs. Command line flags override them.

mod manager;

pub use manager::{ConfigError, ConfigManager};

use rk_core::FilterConfig;
use serde::{Deserialize, Serialize};

/// Complete exporter configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Configuration format version
    pub version: u32,
    /// Small part filter settings
    pub filter: FilterConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            filter: FilterConfig::default(),
        }
    }
}

impl ExportConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }
}
