/*!
 * Configuration types for Sintra
 */

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sintra_core_presence::{
    PolicyTier, PresenceRegistry, RegistryConfig, TimingPolicy, DEFAULT_CAPACITY,
    DEFAULT_STALENESS_THRESHOLD_MS,
};

use crate::error::{Result, SintraError};

/// Main configuration for the intersection controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Address the report listener binds to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the report listener binds to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum number of vehicles tracked at once
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Vehicles silent for longer than this are evicted (ms)
    #[serde(default = "default_staleness_threshold_ms")]
    pub staleness_threshold_ms: u64,

    /// Cadence of the status report (ms)
    #[serde(default = "default_report_interval_ms")]
    pub report_interval_ms: u64,

    /// Log level for diagnostic output
    #[serde(default)]
    pub log_level: LogLevel,

    /// Log file path (None = stdout)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging (shorthand for log_level = debug)
    #[serde(default)]
    pub verbose: bool,

    /// Green-time tiers, lowest vehicle count first
    #[serde(default = "TimingPolicy::default_tiers")]
    pub tiers: Vec<PolicyTier>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            capacity: default_capacity(),
            staleness_threshold_ms: default_staleness_threshold_ms(),
            report_interval_ms: default_report_interval_ms(),
            log_level: LogLevel::Info,
            log_file: None,
            verbose: false,
            tiers: TimingPolicy::default_tiers(),
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors
    Error,

    /// Warnings and errors
    Warn,

    /// Info, warnings, and errors
    #[default]
    Info,

    /// Debug and above
    Debug,

    /// All messages including traces
    Trace,
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    80
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_staleness_threshold_ms() -> u64 {
    DEFAULT_STALENESS_THRESHOLD_MS
}

fn default_report_interval_ms() -> u64 {
    5_000
}

impl ControllerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ControllerConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Check values that the core or the runtime cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.report_interval_ms == 0 {
            return Err(SintraError::Config(
                "report_interval_ms must be greater than 0".to_string(),
            ));
        }
        self.bind_address()?;
        PresenceRegistry::new(self.registry_config())?;
        self.timing_policy()?;
        Ok(())
    }

    /// Registry parameters for the presence core
    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            capacity: self.capacity,
            staleness_threshold_ms: self.staleness_threshold_ms,
        }
    }

    /// Build the timing policy from the configured tiers
    pub fn timing_policy(&self) -> Result<TimingPolicy> {
        Ok(TimingPolicy::new(self.tiers.clone())?)
    }

    /// Socket address for the report listener
    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                SintraError::Config(format!(
                    "Invalid bind address {}:{}: {}",
                    self.host, self.port, e
                ))
            })
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ControllerConfig::default();
        assert_eq!(config.port, 80);
        assert_eq!(config.capacity, 20);
        assert_eq!(config.staleness_threshold_ms, 30_000);
        assert_eq!(config.report_interval_ms, 5_000);
        assert_eq!(config.tiers, TimingPolicy::default_tiers());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: ControllerConfig = toml::from_str("").unwrap();
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
            host = "192.168.4.1"
            port = 8080
            capacity = 50
            log_level = "debug"

            [[tiers]]
            min_vehicles = 1
            green_secs = 7

            [[tiers]]
            min_vehicles = 10
            green_secs = 25
        "#;

        let config: ControllerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host, "192.168.4.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.capacity, 50);
        assert_eq!(config.staleness_threshold_ms, 30_000);
        assert_eq!(config.log_level, LogLevel::Debug);

        let policy = config.timing_policy().unwrap();
        assert_eq!(policy.evaluate(9), 7);
        assert_eq!(policy.evaluate(10), 25);
        assert_eq!(
            config.bind_address().unwrap(),
            "192.168.4.1:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_file_round_trip() {
        let file = NamedTempFile::new().unwrap();
        let config = ControllerConfig {
            port: 9000,
            staleness_threshold_ms: 12_000,
            ..Default::default()
        };

        config.to_file(file.path()).unwrap();
        let loaded = ControllerConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ControllerConfig::from_file(Path::new("/nonexistent/sintra.toml")).unwrap_err();
        assert!(matches!(err, SintraError::Io(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ControllerConfig {
            capacity: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SintraError::Presence(_))));

        let config = ControllerConfig {
            report_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SintraError::Config(_))));

        let config = ControllerConfig {
            host: "not an address".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SintraError::Config(_))));

        let config = ControllerConfig {
            tiers: vec![
                PolicyTier { min_vehicles: 10, green_secs: 5 },
                PolicyTier { min_vehicles: 2, green_secs: 9 },
            ],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SintraError::Presence(_))));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
        assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
        assert_eq!(LogLevel::Info.to_tracing_level(), tracing::Level::INFO);
        assert_eq!(LogLevel::Debug.to_tracing_level(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
    }
}
