//! Configuration for the auto-verify janitor
//!
//! The review window is a business rule shared by every preset; the presets
//! only change how often the janitor looks for overdue entries.

use crate::JanitorError;
use impact_domain::workflow::AUTO_VERIFY_AFTER_HOURS;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the janitor service
///
/// # Examples
///
/// ```
/// use impact_janitor::JanitorConfig;
///
/// let config = JanitorConfig::default();
/// assert_eq!(config.auto_verify_after_hours, 48);
/// assert_eq!(config.sweep_interval_minutes, 15);
///
/// let config = JanitorConfig::aggressive();
/// assert_eq!(config.sweep_interval_minutes, 5);
///
/// let config = JanitorConfig::lenient();
/// assert_eq!(config.sweep_interval_minutes, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JanitorConfig {
    /// Hours a pending entry waits before it is verified automatically
    /// Default: 48
    #[serde(default = "default_auto_verify_after_hours")]
    pub auto_verify_after_hours: u32,

    /// How often to run the sweep cycle (in minutes)
    /// Default: 15
    #[serde(default = "default_sweep_interval_minutes")]
    pub sweep_interval_minutes: u64,

    /// Most entries verified in a single sweep; the rest wait for the next tick
    /// Default: 500
    #[serde(default = "default_batch_limit")]
    pub batch_limit: usize,

    /// Log what would be verified without writing anything
    #[serde(default)]
    pub dry_run: bool,

    /// SQLite database holding the entries
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_auto_verify_after_hours() -> u32 {
    AUTO_VERIFY_AFTER_HOURS as u32
}

fn default_sweep_interval_minutes() -> u64 {
    15
}

fn default_batch_limit() -> usize {
    500
}

fn default_database_path() -> String {
    "impact.db".to_string()
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            auto_verify_after_hours: default_auto_verify_after_hours(),
            sweep_interval_minutes: default_sweep_interval_minutes(),
            batch_limit: default_batch_limit(),
            dry_run: false,
            database_path: default_database_path(),
        }
    }
}

impl JanitorConfig {
    /// Frequent sweeps, so overdue entries flip within minutes
    pub fn aggressive() -> Self {
        Self {
            sweep_interval_minutes: 5,
            ..Self::default()
        }
    }

    /// Hourly sweeps for quiet deployments
    pub fn lenient() -> Self {
        Self {
            sweep_interval_minutes: 60,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, JanitorError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| JanitorError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, JanitorError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| JanitorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), JanitorError> {
        if self.sweep_interval_minutes == 0 {
            return Err(JanitorError::Config(
                "sweep_interval_minutes must be at least 1".to_string(),
            ));
        }
        if self.batch_limit == 0 {
            return Err(JanitorError::Config("batch_limit must be at least 1".to_string()));
        }
        if self.database_path.trim().is_empty() {
            return Err(JanitorError::Config("database_path must not be empty".to_string()));
        }
        Ok(())
    }

    /// Get sweep interval as Duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_minutes * 60)
    }

    /// Age at which a pending entry becomes due
    pub fn auto_verify_window(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.auto_verify_after_hours))
    }
}
