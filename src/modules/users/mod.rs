//! User management: in-memory CRUD behind the [`repository::UserRepository`] port.

pub mod controller;
pub mod model;
pub mod repository;
pub mod router;
pub mod service;
