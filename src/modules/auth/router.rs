use axum::{Router, routing::post};

use super::controller::{login, signup};
use crate::state::AppState;

/// Both routes are public: registered without the auth extractor.
pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}
