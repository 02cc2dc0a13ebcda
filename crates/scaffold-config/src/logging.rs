//! Logging configuration.
//!
//! - `LOG_LEVEL`: `error`, `warn`, `info`, `debug` or `trace` (default: info)
//! - `LOG_DIR`: Directory receiving the per-level log files (default: `logs`)

use std::path::PathBuf;

use tracing::Level;

pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// Most verbose level that is still emitted.
    pub level: Level,
    pub dir: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl LogConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            level: lookup("LOG_LEVEL")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(Level::INFO),
            dir: lookup("LOG_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
        }
    }

    /// Whether events at `level` pass the configured threshold.
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }
}
