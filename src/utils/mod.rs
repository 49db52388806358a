//! Utility modules shared across the application.
//!
//! - [`errors`]: Application error type and HTTP status mapping
//! - [`jwt`]: JWT token creation and verification
//! - [`password`]: Password hashing and verification

pub mod errors;
pub mod jwt;
pub mod password;
