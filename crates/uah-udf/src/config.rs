//! # UDF Configuration
//!
//! Settings for the shared object itself. The rate table is compiled in and
//! is not configurable here.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables of the server process (highest priority)     │
//! │     TO_UAH_LOG=debug                                                   │
//! │     TO_UAH_LOG_ANSI=false                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     path taken from TO_UAH_CONFIG (no default location)                │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     filter "warn,udf_to_uah=info,uah_core=info", no ANSI colors        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # to_uah.toml
//! [log]
//! filter = "info,uah_core=trace"
//! ansi = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::{UdfError, UdfResult};

/// Env var holding the config file path.
pub const CONFIG_PATH_ENV: &str = "TO_UAH_CONFIG";
/// Env var overriding `log.filter`.
pub const LOG_FILTER_ENV: &str = "TO_UAH_LOG";
/// Env var overriding `log.ansi`.
pub const LOG_ANSI_ENV: &str = "TO_UAH_LOG_ANSI";

/// Filter used when nothing else is configured.
pub const DEFAULT_LOG_FILTER: &str = "warn,udf_to_uah=info,uah_core=info";

// =============================================================================
// Log Settings
// =============================================================================

/// Where and how much the function logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive string.
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Color escape codes in log lines. Off by default: the server error log
    /// is a plain file.
    #[serde(default)]
    pub ansi: bool,
}

fn default_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            filter: default_filter(),
            ansi: false,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete UDF configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UdfConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogSettings,
}

impl UdfConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, if it exists)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> UdfResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with the environment lookup supplied by the caller.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> UdfResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Config file path from [`CONFIG_PATH_ENV`], if set.
    pub fn env_path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> UdfResult<Self> {
        debug!(?path, "Loading TO_UAH config from file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| UdfError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    /// Parses TOML text.
    pub fn from_toml(contents: &str) -> UdfResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> UdfResult<()> {
        if self.log.filter.trim().is_empty() {
            return Err(UdfError::InvalidConfig(
                "log.filter must not be empty".into(),
            ));
        }

        EnvFilter::try_new(&self.log.filter).map_err(|e| {
            UdfError::InvalidConfig(format!("log.filter '{}': {}", self.log.filter, e))
        })?;

        Ok(())
    }

    /// Applies overrides looked up by env var name.
    ///
    /// Takes the lookup as a closure so tests need not touch the process
    /// environment.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(filter) = lookup(LOG_FILTER_ENV) {
            debug!(filter = %filter, "Overriding log filter from environment");
            self.log.filter = filter;
        }

        if let Some(ansi) = lookup(LOG_ANSI_ENV) {
            match ansi.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.log.ansi = true,
                "0" | "false" | "no" | "off" => self.log.ansi = false,
                other => debug!(value = %other, "Unknown TO_UAH_LOG_ANSI value"),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = UdfConfig::default();
        assert_eq!(config.log.filter, DEFAULT_LOG_FILTER);
        assert!(!config.log.ansi);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = UdfConfig::from_toml("[log]\nfilter = \"debug\"\nansi = true\n").unwrap();
        assert_eq!(config.log.filter, "debug");
        assert!(config.log.ansi);

        let partial = UdfConfig::from_toml("[log]\nansi = true\n").unwrap();
        assert_eq!(partial.log.filter, DEFAULT_LOG_FILTER);

        let empty = UdfConfig::from_toml("").unwrap();
        assert_eq!(empty, UdfConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let err = UdfConfig::from_toml("[log\nfilter=").unwrap_err();
        assert!(matches!(err, UdfError::Toml(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = UdfConfig::default();
        config.apply_overrides(lookup(&[(LOG_FILTER_ENV, "trace"), (LOG_ANSI_ENV, "yes")]));
        assert_eq!(config.log.filter, "trace");
        assert!(config.log.ansi);

        config.apply_overrides(lookup(&[(LOG_ANSI_ENV, "maybe")]));
        assert!(config.log.ansi);

        config.apply_overrides(lookup(&[(LOG_ANSI_ENV, "OFF")]));
        assert!(!config.log.ansi);
    }

    #[test]
    fn test_validate_filter() {
        let mut config = UdfConfig::default();
        config.log.filter = "   ".into();
        assert!(matches!(config.validate(), Err(UdfError::InvalidConfig(_))));

        config.log.filter = "uah_core=notalevel".into();
        assert!(matches!(config.validate(), Err(UdfError::InvalidConfig(_))));

        config.log.filter = "info,uah_core=trace".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("to_uah_config_that_does_not_exist.toml");
        let config = UdfConfig::load_with(Some(path), lookup(&[])).unwrap();
        assert_eq!(config, UdfConfig::default());
    }

    #[test]
    fn test_load_applies_env_after_file() {
        let path = std::env::temp_dir().join(format!("to_uah_env_{}.toml", std::process::id()));
        std::fs::write(&path, "[log]\nfilter = \"warn\"\nansi = true\n").unwrap();
        let config = UdfConfig::load_with(
            Some(path.clone()),
            lookup(&[(LOG_FILTER_ENV, "debug"), (LOG_ANSI_ENV, "0")]),
        );
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.log.filter, "debug");
        assert!(!config.log.ansi);
    }

    #[test]
    fn test_load_rejects_bad_env_filter() {
        let err = UdfConfig::load_with(None, lookup(&[(LOG_FILTER_ENV, "uah_core=loud")]))
            .unwrap_err();
        assert!(matches!(err, UdfError::InvalidConfig(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = UdfConfig {
            log: LogSettings {
                filter: "info,uah_core=trace".into(),
                ansi: true,
            },
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"log":{"filter":"info,uah_core=trace","ansi":true}}"#);

        let parsed: UdfConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        let partial: UdfConfig = serde_json::from_str(r#"{"log":{}}"#).unwrap();
        assert_eq!(partial, UdfConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("to_uah_{}.toml", std::process::id()));
        std::fs::write(&path, "[log]\nfilter = \"warn\"\n").unwrap();
        let config = UdfConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.log.filter, "warn");
    }

    #[test]
    fn test_unreadable_file() {
        let err = UdfConfig::from_file(&std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, UdfError::ConfigLoadFailed(_)));
    }
}
