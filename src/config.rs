//! Configuration loading.
//!
//! Settings live in a TOML file. Every field is optional:
//!
//! ```toml
//! # Base used by the `log` key; 0 selects the natural logarithm.
//! log_base = 10.0
//! # Significant digits shown for results.
//! precision = 10
//! # Copy each completed result to the clipboard.
//! copy_on_equals = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::calculator::DEFAULT_PRECISION;
use crate::error::ConfigError;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "KEYPAD_CALC_CONFIG";

/// Largest precision that still carries meaning for an `f64`.
const MAX_PRECISION: usize = 17;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base used by the `log` key; 0 selects the natural logarithm.
    pub log_base: f64,
    pub precision: usize,
    pub copy_on_equals: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_base: 10.0,
            precision: DEFAULT_PRECISION,
            copy_on_equals: false,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise the path comes from
    /// [`CONFIG_ENV`] or the user config directory, and a missing file there
    /// yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        match resolve_config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PRECISION).contains(&self.precision) {
            return Err(ConfigError::InvalidValue {
                field: "precision",
                reason: format!("must be between 1 and {MAX_PRECISION}"),
            });
        }
        if !self.log_base.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "log_base",
                reason: "must be a finite number".to_string(),
            });
        }
        Ok(())
    }
}

/// Resolve the configuration file path.
///
/// [`CONFIG_ENV`] wins over `<config dir>/keypad-calc/config.toml`.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir().map(|dir| dir.join("keypad-calc").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_base, 10.0);
        assert_eq!(config.precision, 10);
        assert!(!config.copy_on_equals);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse("precision = 6\ncopy_on_equals = true\n").unwrap();
        assert_eq!(config.precision, 6);
        assert!(config.copy_on_equals);
        assert_eq!(config.log_base, 10.0);
    }

    #[test]
    fn test_natural_log_base() {
        let config = Config::parse("log_base = 0.0").unwrap();
        assert_eq!(config.log_base, 0.0);
    }

    #[test]
    fn test_invalid_precision() {
        let err = Config::parse("precision = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "precision",
                ..
            }
        ));
        assert!(Config::parse("precision = 40").is_err());
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("precision = \"ten\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_base = 2.0").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.log_base, 2.0);
    }

    #[test]
    fn test_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
