//! Configuration manager for loading and saving exporter configuration

use std::path::{Path, PathBuf};

use super::ExportConfig;

/// Configuration error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// Error during deserialization
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

/// Configuration manager handles loading, saving, and accessing configuration
pub struct ConfigManager {
    config: ExportConfig,
    config_path: PathBuf,
    dirty: bool,
}

impl ConfigManager {
    /// Load from an explicit file, or from the OS config directory
    ///
    /// A missing default file yields defaults. A missing explicit file, or
    /// any file that fails to parse, is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (config_path, config) = match explicit {
            Some(path) => (path.to_path_buf(), Some(Self::load_from_path(path)?)),
            None => {
                let path = Self::default_config_path();
                let config = if path.exists() {
                    Some(Self::load_from_path(&path)?)
                } else {
                    None
                };
                (path, config)
            }
        };

        let config = config.unwrap_or_else(|| {
            tracing::info!("No config file found, using defaults");
            ExportConfig::new()
        });

        Ok(Self {
            config,
            config_path,
            dirty: false,
        })
    }

    /// Get the OS-standard configuration directory
    fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rk-export")
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join("config.ron")
    }

    /// Load configuration from a file path
    fn load_from_path(path: &Path) -> Result<ExportConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config: ExportConfig =
            ron::from_str(&content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get a reference to the current configuration
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Get a mutable reference to the configuration (marks as dirty)
    pub fn config_mut(&mut self) -> &mut ExportConfig {
        self.dirty = true;
        &mut self.config
    }

    /// Check if the configuration has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Save the configuration to disk
    pub fn save(&mut self) -> Result<(), ConfigError> {
        if !self.dirty {
            return Ok(());
        }

        // Ensure config directory exists
        if let Some(parent) = self.config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        self.config.version = ExportConfig::CURRENT_VERSION;
        let content = ron::ser::to_string_pretty(&self.config, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::write(&self.config_path, &content).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::info!("Saved config to {:?}", self.config_path);
        self.dirty = false;
        Ok(())
    }

    /// Get the config file path (for display purposes)
    pub fn config_file_path(&self) -> &Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rk_core::LengthUnit;

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(
            &path,
            "(version: 1, filter: (enabled: true, threshold_value: 2.0, threshold_unit: cm))",
        )
        .unwrap();

        let manager = ConfigManager::load(Some(&path)).unwrap();
        let filter = &manager.config().filter;
        assert!(filter.enabled);
        assert_eq!(filter.threshold_value, 2.0);
        assert_eq!(filter.threshold_unit, LengthUnit::Centimeters);
        assert!(!manager.is_dirty());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigManager::load(Some(&dir.path().join("nope.ron")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_invalid_unit_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "(filter: (threshold_unit: inch))").unwrap();
        assert!(matches!(
            ConfigManager::load(Some(&path)),
            Err(ConfigError::Deserialize(_))
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ron");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "()").unwrap();

        let mut manager = ConfigManager::load(Some(&path)).unwrap();
        assert_eq!(manager.config().filter.threshold_value, 5.0);
        manager.config_mut().filter.threshold_unit = LengthUnit::Meters;
        assert!(manager.is_dirty());
        manager.save().unwrap();
        assert!(!manager.is_dirty());

        let reloaded = ConfigManager::load(Some(&path)).unwrap();
        assert_eq!(reloaded.config().filter.threshold_unit, LengthUnit::Meters);
        assert_eq!(reloaded.config().version, ExportConfig::CURRENT_VERSION);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "(filter: (enabled: true))").unwrap();

        let manager = ConfigManager::load(Some(&path)).unwrap();
        assert!(manager.config().filter.enabled);
        assert_eq!(manager.config().filter.threshold_value, 5.0);
        assert!(!manager.is_dirty());
        assert_eq!(manager.config_file_path(), path.as_path());
    }
}
