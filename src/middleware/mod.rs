//! Cross-cutting request stages.
//!
//! - [`error_handler`]: not-found fallback, error logging and debug details
//! - [`rate_limit`]: shared request budget for the `/api` tree
//! - [`security`]: hardening headers and CORS policy

pub mod error_handler;
pub mod rate_limit;
pub mod security;
