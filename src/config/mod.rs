//! Configuration modules, loaded from environment variables at startup.
//!
//! - [`cors`]: CORS allowed origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: JWT signing secret and token expiry

pub mod cors;
pub mod database;
pub mod jwt;
