//! # Worker Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ORDERDESK_DB_PATH=/var/lib/orderdesk/orders.db                     │
//! │     ORDERDESK_CUSTOMER_IDS=1,2,3                                       │
//! │     ORDERDESK_REPORT_FORMAT=json                                       │
//! │     ORDERDESK_SEED_DEMO=true                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/orderdesk/worker.toml (Linux)                            │
//! │     ~/Library/Application Support/com.orderdesk.orderdesk/worker.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # worker.toml
//! [database]
//! path = "./orderdesk.db"
//! seed_demo_data = false
//!
//! [processing]
//! customer_ids = [1, 2, 3]
//! report_format = "log"  # log | json
//!
//! [retry]
//! initial_backoff_ms = 500
//! max_backoff_secs = 10
//! max_elapsed_secs = 60
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{WorkerError, WorkerResult};

// =============================================================================
// Report Format
// =============================================================================

/// How processed orders are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// One human-readable line per order.
    #[default]
    Log,

    /// One JSON object per line.
    Json,
}

impl FromStr for ReportFormat {
    type Err = WorkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" | "text" => Ok(ReportFormat::Log),
            "json" => Ok(ReportFormat::Json),
            other => Err(WorkerError::InvalidConfig(format!(
                "Unknown report format: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Log => write!(f, "log"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Database location and startup behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// Insert the demo data set when the database has no customers.
    #[serde(default)]
    pub seed_demo_data: bool,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./orderdesk.db")
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
            seed_demo_data: false,
        }
    }
}

/// Which customers to process and how to report them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingSettings {
    /// Customers processed in this order, one at a time.
    #[serde(default)]
    pub customer_ids: Vec<i64>,

    #[serde(default)]
    pub report_format: ReportFormat,
}

/// Exponential backoff for the initial database connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    /// First retry delay (milliseconds).
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,

    /// Upper bound for a single delay (seconds).
    #[serde(default = "default_max_backoff")]
    pub max_backoff_secs: u64,

    /// Give up after this much time (seconds).
    #[serde(default = "default_max_elapsed")]
    pub max_elapsed_secs: u64,
}

fn default_initial_backoff() -> u64 {
    500
}

fn default_max_backoff() -> u64 {
    10
}

fn default_max_elapsed() -> u64 {
    60
}

impl Default for RetrySettings {
    fn default() -> Self {
        RetrySettings {
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_secs: default_max_backoff(),
            max_elapsed_secs: default_max_elapsed(),
        }
    }
}

impl RetrySettings {
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_secs)
    }

    pub fn max_elapsed(&self) -> Duration {
        Duration::from_secs(self.max_elapsed_secs)
    }
}

// =============================================================================
// Worker Config
// =============================================================================

/// Complete worker configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkerConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub processing: ProcessingSettings,

    #[serde(default)]
    pub retry: RetrySettings,
}

impl WorkerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (worker.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> WorkerResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading worker config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file without applying overrides.
    pub fn from_file(path: &Path) -> WorkerResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> WorkerResult<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(WorkerError::InvalidConfig(
                "database.path must not be empty".into(),
            ));
        }

        if let Some(id) = self.processing.customer_ids.iter().find(|id| **id <= 0) {
            return Err(WorkerError::InvalidConfig(format!(
                "customer ids must be positive, got {id}"
            )));
        }

        if self.retry.initial_backoff_ms == 0 {
            return Err(WorkerError::InvalidConfig(
                "retry.initial_backoff_ms must be greater than 0".into(),
            ));
        }

        if self.retry.max_backoff() < self.retry.initial_backoff() {
            return Err(WorkerError::InvalidConfig(
                "retry.max_backoff_secs must not be below the initial backoff".into(),
            ));
        }

        Ok(())
    }

    /// Applies `ORDERDESK_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("ORDERDESK_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(ids) = lookup("ORDERDESK_CUSTOMER_IDS") {
            match parse_customer_ids(&ids) {
                Some(parsed) => {
                    debug!(count = parsed.len(), "Overriding customer ids from environment");
                    self.processing.customer_ids = parsed;
                }
                None => warn!(value = %ids, "Ignoring malformed ORDERDESK_CUSTOMER_IDS"),
            }
        }

        if let Some(format) = lookup("ORDERDESK_REPORT_FORMAT") {
            match format.parse() {
                Ok(parsed) => self.processing.report_format = parsed,
                Err(_) => warn!(format = %format, "Unknown report format in environment"),
            }
        }

        if let Some(seed) = lookup("ORDERDESK_SEED_DEMO") {
            match seed.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.database.seed_demo_data = true,
                "0" | "false" | "no" => self.database.seed_demo_data = false,
                _ => warn!(value = %seed, "Ignoring malformed ORDERDESK_SEED_DEMO"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "orderdesk", "orderdesk")
            .map(|dirs| dirs.config_dir().join("worker.toml"))
    }
}

/// Parses `"1, 2,3"`; `None` if any element is not an integer.
fn parse_customer_ids(raw: &str) -> Option<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect()
}
