//! # Scaffold Config
//!
//! Configuration types for the scaffold API, loaded from environment
//! variables with defaults for anything unset or unparsable.
//!
//! - [`app`]: Top-level [`AppConfig`] and the runtime [`Environment`]
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`logging`]: Log level threshold and log file directory
//! - [`rate_limit`]: API rate limiting configuration
//!
//! # Example
//!
//! ```ignore
//! use scaffold_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env();
//! println!("listening on {}", config.port);
//! ```

pub mod app;
pub mod cors;
pub mod logging;
pub mod rate_limit;

// Re-export commonly used types at crate root
pub use app::{AppConfig, Environment};
pub use cors::CorsConfig;
pub use logging::LogConfig;
pub use rate_limit::RateLimitConfig;
