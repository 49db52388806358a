use axum::{
    Router, middleware,
    routing::{get, patch},
};

use super::controller::{list_users, my_voted_ideas, update_role};
use crate::middleware::role::require_admin;
use crate::state::AppState;

/// Listing users and changing roles are admin-only; `/me/votes` only
/// needs an authenticated principal.
pub fn init_users_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", get(list_users))
        .route("/{id}/role", patch(update_role))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/me/votes", get(my_voted_ideas))
        .merge(admin_routes)
}
