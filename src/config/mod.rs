//! Configuration module
//!
//! Resolves runtime settings from built-in defaults, an optional YAML file,
//! and command-line / environment overrides, in increasing precedence.

pub mod loader;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::engine::{DayBoundary, GameRules};

pub use loader::{Overrides, load_settings, parse_settings};

/// Default listen address, matching the port of earlier deployments.
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory holding `counters.json`, `limited_counters.json` and `record.json`.
    pub data_dir: PathBuf,
    /// Timezone policy for the daily reset.
    pub day_boundary: DayBoundary,
    /// Game rules.
    pub rules: GameRules,
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Port for the Prometheus endpoint; disabled when absent.
    pub metrics_port: Option<u16>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            day_boundary: DayBoundary::default(),
            rules: GameRules::default(),
            server: ServerSettings::default(),
            metrics_port: None,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    /// Listen address: `host:port`, `:port` or a bare port.
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}
