//! User accounts: storage and the authenticated profile endpoint.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
