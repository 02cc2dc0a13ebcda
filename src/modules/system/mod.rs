//! Health probe and API index.

pub mod controller;
pub mod router;
