//! Settings loader
//!
//! Loading pipeline:
//! 1. Size check and raw read of the YAML file (if any)
//! 2. YAML parsing into [`Settings`], unknown keys rejected
//! 3. Command-line / environment overrides
//! 4. Rule validation

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::engine::DayBoundary;
use crate::error::ConfigError;

/// Values supplied on the command line or through the environment.
///
/// Every field left as `None` keeps the value from the file or the default.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--data-dir` / `ROULETTE_DATA_DIR`
    pub data_dir: Option<PathBuf>,
    /// `--day-boundary` / `ROULETTE_DAY_BOUNDARY`
    pub day_boundary: Option<DayBoundary>,
    /// `--bind` / `ROULETTE_BIND`
    pub bind: Option<String>,
    /// `--port` / `PORT`; only used when no bind address is given
    pub port: Option<u16>,
    /// `--metrics-port` / `ROULETTE_METRICS_PORT`
    pub metrics_port: Option<u16>,
}

impl Overrides {
    /// Applies these overrides on top of `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(dir) = &self.data_dir {
            settings.data_dir.clone_from(dir);
        }
        if let Some(boundary) = self.day_boundary {
            settings.day_boundary = boundary;
        }
        if let Some(bind) = &self.bind {
            settings.server.bind.clone_from(bind);
        } else if let Some(port) = self.port {
            settings.server.bind = format!("0.0.0.0:{port}");
        }
        if self.metrics_port.is_some() {
            settings.metrics_port = self.metrics_port;
        }
    }
}

/// Loads settings from an optional file and applies `overrides`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file is missing, too large, not valid
/// YAML for [`Settings`], or if a rule is out of range.
pub fn load_settings(path: Option<&Path>, overrides: &Overrides) -> Result<Settings, ConfigError> {
    let mut settings = match path {
        Some(path) => read_file(path)?,
        None => Settings::default(),
    };
    overrides.apply(&mut settings);
    settings.rules.validate()?;
    Ok(settings)
}

/// Parses settings from YAML text.
///
/// `path` is only used in error messages. An empty document yields the
/// defaults.
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] on invalid YAML or unknown keys.
pub fn parse_settings(text: &str, path: &Path) -> Result<Settings, ConfigError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    })
}

fn read_file(path: &Path) -> Result<Settings, ConfigError> {
    let max_size = env_or("ROULETTE_MAX_CONFIG_SIZE", 64 * 1024);

    let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
        path: path.to_path_buf(),
    })?;
    let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    if file_size > max_size {
        return Err(ConfigError::InvalidValue {
            field: "file_size".to_string(),
            value: format!("{file_size} bytes"),
            expected: format!("at most {max_size} bytes"),
        });
    }

    let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
        path: path.to_path_buf(),
    })?;
    parse_settings(&raw, path)
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
