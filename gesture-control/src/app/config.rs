//! Configuration Management

use crate::classifier::ThresholdConfig;
use crate::dispatch::ControllerConfig;
use crate::session::SessionOptions;
use crate::stabilizer::StabilizerConfig;
use crate::telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Vote window and smoothing
    #[serde(default)]
    pub stabilizer: StabilizerConfig,
    /// Per-gesture confidence thresholds
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    /// Pointer mapping
    #[serde(default)]
    pub controller: ControllerConfig,
    /// Gesture log output
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.stabilizer.validate()?;
        self.thresholds.validate()?;
        self.controller.validate()?;
        if let Some(path) = &self.telemetry.path {
            if path.as_os_str().is_empty() {
                return Err(crate::Error::Config(
                    "telemetry path must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Session defaults derived from this config
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions::default()
            .with_thresholds(self.thresholds)
            .with_stabilizer(self.stabilizer)
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = self.to_toml()?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".gesture_control").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.stabilizer.buffer_size, 5);
        assert_eq!(config.thresholds.index_point, 0.85);
        assert_eq!(config.controller.scroll_speed, 10);
        assert!(config.telemetry.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let toml = Config::default().to_toml().unwrap();
        assert!(toml.contains("[stabilizer]"));
        assert!(toml.contains("[thresholds]"));
        assert!(toml.contains("[controller]"));
        assert!(toml.contains("[telemetry]"));
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path();
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut original = Config::default();
        original.stabilizer.buffer_size = 7;
        original.thresholds.pinch = 0.9;
        original.telemetry.path = Some(temp_dir.path().join("g.jsonl"));

        original.save(&config_path).expect("Failed to save config");
        let loaded = Config::load(&config_path).expect("Failed to load config");
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load(&PathBuf::from("/tmp/nonexistent_gesture_config_12345.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[stabilizer]
min_consecutive = 2
"#,
        )
        .expect("Partial config should deserialize");
        assert_eq!(config.stabilizer.min_consecutive, 2);
        assert_eq!(config.stabilizer.buffer_size, 5);
        assert_eq!(config.thresholds, ThresholdConfig::default());
        assert_eq!(config.controller, ControllerConfig::default());
    }

    #[test]
    fn test_load_invalid_values() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("bad_config.toml");
        std::fs::write(
            &config_path,
            r#"
[stabilizer]
buffer_size = 2
min_consecutive = 3
"#,
        )
        .expect("Failed to write config");
        assert!(matches!(
            Config::load(&config_path),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_invalid_toml_parsing() {
        let result: Result<Config, _> = toml::from_str("this is not valid toml {{{}}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_session_options_from_config() {
        let mut config = Config::default();
        config.thresholds.fist = 0.6;
        config.stabilizer.smoothing_factor = 0.3;
        let options = config.session_options();
        assert_eq!(options.thresholds.fist, 0.6);
        assert_eq!(options.stabilizer.smoothing_factor, 0.3);
        assert!(options.profile_id.is_none());
    }
}
