use std::env;

use anyhow::{Context, Result};

/// JWT signing configuration, established once at process start and
/// read-only afterwards.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    /// Loads the configuration from the environment.
    ///
    /// Fails when `JWT_SECRET` is unset: a missing signing secret is a
    /// boot-time error and the process must not serve traffic without it.
    pub fn from_env() -> Result<Self> {
        let secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;

        Ok(Self {
            secret,
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
        })
    }
}
