//! Top-level application configuration.
//!
//! # Environment Variables
//!
//! - `PORT`: Listener port (default: 3000)
//! - `APP_ENV`: `development`, `production` or `test` (default: development).
//!   `NODE_ENV` is honoured when `APP_ENV` is unset.
//! - `BODY_LIMIT_BYTES`: Maximum accepted request body (default: 10 MB)
//!
//! Logging, CORS and rate limiting read their own variables, see
//! [`LogConfig`], [`CorsConfig`] and [`RateLimitConfig`].

use std::fmt;
use std::str::FromStr;

use crate::cors::CorsConfig;
use crate::logging::LogConfig;
use crate::rate_limit::RateLimitConfig;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Runtime environment the server was started in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => Err(format!("unknown environment `{other}`")),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub environment: Environment,
    pub body_limit: usize,
    pub log: LogConfig,
    pub cors: CorsConfig,
    pub rate_limit: RateLimitConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: Environment::default(),
            body_limit: DEFAULT_BODY_LIMIT,
            log: LogConfig::default(),
            cors: CorsConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads the whole configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self {
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            environment,
            body_limit: lookup("BODY_LIMIT_BYTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_BODY_LIMIT),
            log: LogConfig::from_lookup(&lookup),
            cors: CorsConfig::from_lookup(&lookup),
            rate_limit: RateLimitConfig::from_lookup(&lookup),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}
