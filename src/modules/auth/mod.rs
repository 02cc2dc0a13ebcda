//! Authentication stubs: register, login and logout over a [`session::SessionIssuer`].

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
pub mod session;
