//! Configuration management system for ferrosync
//!
//! ferrosync is driven by command-line flags. This crate holds the knobs that sit
//! behind those flags and lets them be layered from several sources:
//!
//! - **Defaults**: every option has a default matching the flag-only behavior
//! - **Files**: optional YAML, TOML or JSON file, picked by extension
//! - **Environment overrides**: `FERROSYNC__<SECTION>__<KEY>` variables
//! - **Validation**: out-of-range values are rejected before any run starts
//!
//! # Examples
//!
//! ```rust
//! use ferrosync_config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .add_defaults()
//!     .add_env_prefix("FERROSYNC")
//!     .build()
//!     .expect("Failed to load configuration");
//!
//! assert_eq!(config.compare.large_file_threshold, 1_000_000);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use ferrosync_types::SyncPolicy;
use serde::{Deserialize, Serialize};

pub mod builder;
pub mod error;
pub mod loader;

pub use builder::ConfigBuilder;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

/// Environment variable prefix used by the default loaders
pub const ENV_PREFIX: &str = "FERROSYNC";

/// Main configuration structure for ferrosync
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How file contents are compared
    pub compare: CompareConfig,
    /// Sync steps enabled even when no flag asks for them
    pub sync: SyncPolicy,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Progress display configuration
    pub progress: ProgressConfig,
}

/// Content comparison configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Binary files larger than this many bytes are compared by size only
    /// while `large_binary_shortcut` is on
    pub large_file_threshold: u64,
    /// Treat same-sized large binary files as equal without reading them.
    ///
    /// This is an approximation: two different binaries of equal size above the
    /// threshold are reported as identical. Turn it off for exact comparisons.
    pub large_binary_shortcut: bool,
    /// Number of leading bytes decoded to tell text files from binary ones
    pub text_probe_len: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            large_file_threshold: 1_000_000,
            large_binary_shortcut: true,
            text_probe_len: 3,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Enable JSON formatting
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
        }
    }
}

/// Progress display configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Show progress bars while comparing and syncing
    pub enabled: bool,
    /// Spinner refresh interval in milliseconds
    pub tick_millis: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_millis: 100,
        }
    }
}
