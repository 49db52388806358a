//! Request-authorization pipeline.
//!
//! Two independent, composable checkpoints decide access per route:
//!
//! 1. Token authentication ([`auth::AuthUser`]): extracts and verifies the
//!    bearer token and resolves the [`auth::Principal`]. Public routes are
//!    simply registered without the extractor, which is the explicit
//!    per-route access configuration.
//! 2. Role enforcement ([`role::require_roles`]): applied as a route layer
//!    where a route declares required roles; it invokes the token
//!    checkpoint itself, so a role-restricted route never runs without a
//!    resolved principal.

pub mod auth;
pub mod role;
