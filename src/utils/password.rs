use bcrypt::{DEFAULT_COST, hash, verify};

use crate::utils::errors::AppError;

/// Hashes a plaintext password with bcrypt at the default cost.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(AppError::internal)
}

/// Verifies a plaintext password against a stored bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash).map_err(AppError::internal)
}
