//! Host configuration for the Pomodoro clock.
//!
//! Only host-side behaviour is configurable (poll cadence, progress scale,
//! sound, bar width). Work and break lengths are fixed.

mod error;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::ConfigError;

/// Name of the configuration directory under the platform config dir.
const APP_DIR_NAME: &str = "pomodoro-clock";

/// Name of the configuration file.
const CONFIG_FILE_NAME: &str = "config.json";

fn default_tick_interval_ms() -> u64 {
    50
}

fn default_progress_scale() -> u32 {
    10_000
}

fn default_sound_enabled() -> bool {
    true
}

fn default_bar_width() -> usize {
    20
}

/// Settings for the host that drives the session engine.
///
/// # Example
///
/// ```
/// use pomodoro_clock::config::HostConfig;
///
/// let config = HostConfig::default();
/// assert_eq!(config.tick_interval_ms, 50);
/// assert_eq!(config.progress_scale, 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Poll cadence in milliseconds (10-1000)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Integer scale progress is mapped onto (1-100000)
    #[serde(default = "default_progress_scale")]
    pub progress_scale: u32,

    /// Whether to ring an alert on completion
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,

    /// Width of the terminal progress bar in cells (1-200)
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            progress_scale: default_progress_scale(),
            sound_enabled: default_sound_enabled(),
            bar_width: default_bar_width(),
        }
    }
}

impl HostConfig {
    /// Sets the poll cadence.
    #[must_use]
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Enables or disables the completion alert.
    #[must_use]
    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first out-of-range field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(10..=1000).contains(&self.tick_interval_ms) {
            return Err(ConfigError::Invalid(
                "tick_interval_ms は10-1000の範囲で指定してください".to_string(),
            ));
        }
        if !(1..=100_000).contains(&self.progress_scale) {
            return Err(ConfigError::Invalid(
                "progress_scale は1-100000の範囲で指定してください".to_string(),
            ));
        }
        if !(1..=200).contains(&self.bar_width) {
            return Err(ConfigError::Invalid(
                "bar_width は1-200の範囲で指定してください".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads and validates the configuration at `path`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads the configuration from `path`, or from the default location.
    ///
    /// # Errors
    ///
    /// See [`HostConfig::load_from`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => match default_config_path() {
                Some(path) => Self::load_from(&path),
                None => Ok(Self::default()),
            },
        }
    }
}

/// Returns `<config_dir>/pomodoro-clock/config.json`, if a config dir exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod host_config_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let config = HostConfig::default();
            assert_eq!(config.tick_interval_ms, 50);
            assert_eq!(config.progress_scale, 10_000);
            assert!(config.sound_enabled);
            assert_eq!(config.bar_width, 20);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_builder_pattern() {
            let config = HostConfig::default()
                .with_tick_interval_ms(100)
                .with_sound(false);

            assert_eq!(config.tick_interval_ms, 100);
            assert!(!config.sound_enabled);
        }

        #[test]
        fn test_validate_tick_interval_bounds() {
            assert!(HostConfig::default().with_tick_interval_ms(10).validate().is_ok());
            assert!(HostConfig::default().with_tick_interval_ms(1000).validate().is_ok());
            assert!(HostConfig::default().with_tick_interval_ms(9).validate().is_err());
            assert!(HostConfig::default().with_tick_interval_ms(1001).validate().is_err());
        }

        #[test]
        fn test_validate_progress_scale_zero() {
            let config = HostConfig {
                progress_scale: 0,
                ..HostConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("progress_scale"));
        }

        #[test]
        fn test_validate_bar_width() {
            let config = HostConfig {
                bar_width: 0,
                ..HostConfig::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_partial_json_uses_defaults() {
            let config: HostConfig = serde_json::from_str(r#"{"sound_enabled": false}"#).unwrap();
            assert!(!config.sound_enabled);
            assert_eq!(config.tick_interval_ms, 50);
            assert_eq!(config.progress_scale, 10_000);
        }
    }

    mod load_tests {
        use super::*;

        #[test]
        fn test_missing_file_gives_defaults() {
            let dir = tempfile::tempdir().unwrap();
            let config = HostConfig::load_from(&dir.path().join("absent.json")).unwrap();
            assert_eq!(config, HostConfig::default());
        }

        #[test]
        fn test_load_valid_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.json");
            fs::write(&path, r#"{"tick_interval_ms": 100, "bar_width": 30}"#).unwrap();

            let config = HostConfig::load_from(&path).unwrap();
            assert_eq!(config.tick_interval_ms, 100);
            assert_eq!(config.bar_width, 30);
        }

        #[test]
        fn test_load_malformed_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.json");
            fs::write(&path, "not json").unwrap();

            let err = HostConfig::load_from(&path).unwrap_err();
            assert!(matches!(err, ConfigError::Parse { .. }));
        }

        #[test]
        fn test_load_out_of_range_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.json");
            fs::write(&path, r#"{"tick_interval_ms": 0}"#).unwrap();

            let err = HostConfig::load_from(&path).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
        }

        #[test]
        fn test_default_path_file_name() {
            if let Some(path) = default_config_path() {
                assert!(path.ends_with("pomodoro-clock/config.json"));
            }
        }
    }
}
