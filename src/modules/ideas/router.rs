use axum::{
    Router,
    routing::{get, patch, post},
};

use super::controller::{cast_vote, create_idea, delete_idea, get_report, list_ideas, update_title};
use crate::state::AppState;

/// Listing is public; every other route authenticates via the `AuthUser`
/// extractor in its handler.
pub fn init_ideas_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ideas).post(create_idea))
        .route("/{id}", patch(update_title).delete(delete_idea))
        .route("/{id}/vote", post(cast_vote))
        .route("/{id}/report", get(get_report))
}
