//! # Scaffold API
//!
//! A minimal REST API skeleton built on Axum: user CRUD over an in-memory
//! store, stub authentication endpoints, a health probe and the request
//! pipeline a production service starts from.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── scaffold-core/    # Response envelope, AppError, pagination
//! └── scaffold-config/  # Environment-driven configuration
//! src/
//! ├── middleware/       # Error handling, rate limiting, security headers
//! ├── modules/
//! │   ├── auth/        # Register, login, logout (stub sessions)
//! │   ├── system/      # Health check and API index
//! │   └── users/       # User CRUD with search and pagination
//! ├── logging.rs        # Tracing setup and request logging
//! ├── router.rs         # Route tree and pipeline
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Body extraction, normalization and validation
//! ```
//!
//! Each feature module follows the same layout:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Business logic
//! - `model.rs`: Entities and DTOs
//! - `router.rs`: Axum router configuration
//!
//! ## Responses
//!
//! Every JSON response is an envelope:
//!
//! ```json
//! { "success": true, "code": 200, "message": "Success", "data": {}, "timestamp": "..." }
//! ```
//!
//! Failures carry `success: false`, the status code and a message, plus an
//! `errors` list for validation failures. Outside production, error
//! bodies also include `stack` and `error` for debugging.
//!
//! ## Environment Variables
//!
//! ```bash
//! PORT=3000
//! APP_ENV=development          # NODE_ENV is read as a fallback
//! LOG_LEVEL=info
//! LOG_DIR=logs
//! ALLOWED_ORIGINS=https://yourdomain.com
//! RATE_LIMIT_MAX=100
//! RATE_LIMIT_WINDOW_SECS=900
//! BODY_LIMIT_BYTES=10485760
//! ```

pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use scaffold_config;
pub use scaffold_core;
