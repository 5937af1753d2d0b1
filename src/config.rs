// src/config.rs
//! Configuration management with platform-specific storage

use crate::error::{AlpacaError, Result};
use crate::utilities::culture::Culture;
use crate::utilities::sexagesimal::MAX_PLACES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilConfig {
    /// Culture tag used when none is given on the command line ("" = invariant)
    pub culture: String,
    /// Fractional digits written for the seconds field
    pub places: u8,
}

impl Default for UtilConfig {
    fn default() -> Self {
        Self {
            culture: String::new(),
            places: 2,
        }
    }
}

impl UtilConfig {
    /// Load configuration from the platform config file
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Save configuration to the platform config file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// Load from a specific file, falling back to defaults if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| AlpacaError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| AlpacaError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save to a specific file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AlpacaError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(path, contents)
            .map_err(|e| AlpacaError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Resolve the configured culture tag
    pub fn culture(&self) -> Result<Culture> {
        Culture::from_name(&self.culture)
    }

    fn validate(&self) -> Result<()> {
        self.culture()?;
        if self.places > MAX_PLACES {
            warn!(places = self.places, max = MAX_PLACES, "configured places will be clamped");
        }
        Ok(())
    }

    /// Get config file path on Windows
    #[cfg(windows)]
    pub fn get_config_path() -> Result<PathBuf> {
        let appdata = std::env::var("APPDATA")
            .map_err(|_| AlpacaError::Config("APPDATA environment variable not set".to_string()))?;

        Ok(PathBuf::from(appdata).join("alpaca-util").join("config.json"))
    }

    /// Get config file path on Unix systems
    #[cfg(not(windows))]
    pub fn get_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| AlpacaError::Config("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config").join("alpaca-util").join("config.json"))
    }

    /// Update the default culture, rejecting unknown tags
    pub fn update_culture(&mut self, culture: &str) -> Result<()> {
        Culture::from_name(culture)?;
        self.culture = culture.to_string();
        Ok(())
    }

    pub fn update_places(&mut self, places: u8) {
        self.places = places.min(MAX_PLACES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UtilConfig::default();
        assert!(config.culture().unwrap().is_invariant());
        assert_eq!(config.places, 2);
    }

    #[test]
    fn test_update_culture() {
        let mut config = UtilConfig::default();
        config.update_culture("de-DE").unwrap();
        assert_eq!(config.culture().unwrap().decimal_separator(), ',');

        assert!(config.update_culture("zz").is_err());
        assert_eq!(config.culture, "de-DE");
    }

    #[test]
    fn test_update_places_clamped() {
        let mut config = UtilConfig::default();
        config.update_places(40);
        assert_eq!(config.places, MAX_PLACES);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = UtilConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, UtilConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = UtilConfig::default();
        config.update_culture("fr").unwrap();
        config.update_places(4);
        config.save_to(&path).unwrap();

        assert_eq!(UtilConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"culture":"de"}"#).unwrap();

        let config = UtilConfig::load_from(&path).unwrap();
        assert_eq!(config.culture, "de");
        assert_eq!(config.places, 2);
    }

    #[test]
    fn test_bad_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(UtilConfig::load_from(&path), Err(AlpacaError::Config(_))));
    }

    #[test]
    fn test_unknown_culture_in_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"culture":"qq-QQ","places":1}"#).unwrap();

        assert!(UtilConfig::load_from(&path).unwrap_err().is_invalid_value());
    }
}
