//! Mess settings loaded from config.toml
//!
//! Every key is optional. A missing file means defaults; a file that exists but
//! does not parse is an error.

use crate::{
    core::monthly::ClearStrategy,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display name of the mess, used in report headers
    pub name: String,
    /// Symbol prefixed to every displayed amount
    pub currency_symbol: String,
    /// How month clears are executed
    pub clear_strategy: ClearStrategy,
    /// Largest per-day meal count the UI offers; informational only
    pub max_daily_meals: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: "Mess".to_string(),
            currency_symbol: "৳".to_string(),
            clear_strategy: ClearStrategy::default(),
            max_daily_meals: 10,
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read ([`Error::Io`])
/// - The TOML syntax is invalid ([`Error::Config`])
/// - A key has the wrong type ([`Error::Config`])
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    debug!("Loading settings from {path_ref:?}");
    let contents = std::fs::read_to_string(path_ref)?;

    parse_settings(&contents)
}

/// Parses settings from TOML text.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from `path`, or defaults when the file does not exist.
pub fn load_settings_or_default<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        warn!("No config file at {path_ref:?}; using default settings");
        return Ok(Settings::default());
    }
    load_settings(path_ref)
}

/// Loads settings from the default location (./config.toml)
pub fn load_default_settings() -> Result<Settings> {
    load_settings_or_default("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let toml_str = r#"
            name = "Area 51"
            currency_symbol = "$"
            clear_strategy = "transactional"
            max_daily_meals = 6
        "#;

        let settings = parse_settings(toml_str).unwrap();
        assert_eq!(settings.name, "Area 51");
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.clear_strategy, ClearStrategy::Transactional);
        assert_eq!(settings.max_daily_meals, 6);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let settings = parse_settings("name = \"Hall B\"").unwrap();
        assert_eq!(settings.name, "Hall B");
        assert_eq!(settings.currency_symbol, "৳");
        assert_eq!(settings.clear_strategy, ClearStrategy::Sequential);
        assert_eq!(settings.max_daily_meals, 10);
    }

    #[test]
    fn test_malformed_settings_is_config_error() {
        let result = parse_settings("clear_strategy = \"sometimes\"");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = load_settings_or_default("does/not/exist/config.toml").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_missing_file_is_error() {
        let err = load_settings("does/not/exist/config.toml").unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
        assert!(!err.is_validation());
        assert!(!err.is_store_failure());
    }
}
