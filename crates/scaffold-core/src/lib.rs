//! # Scaffold Core
//!
//! Core types shared by the scaffold API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`lenient`]: Integers accepted as numbers or numeric strings
//! - [`pagination`]: Lenient page/limit query parsing
//! - [`response`]: The uniform success/failure JSON envelope
//!
//! # Example
//!
//! ```ignore
//! use axum::http::StatusCode;
//! use scaffold_core::{AppError, Envelope};
//!
//! let ok = Envelope::success(StatusCode::OK).with_data(vec!["alice"]);
//! let err = AppError::not_found(anyhow::anyhow!("User not found"));
//! ```

pub mod errors;
pub mod lenient;
pub mod pagination;
pub mod response;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorReport};
pub use lenient::IntegerInput;
pub use pagination::PaginationParams;
pub use response::{Envelope, FieldError, Pagination};
