//! Subscription routes mounted at `/subscribers`.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::subscribers;
use crate::state::AppState;

/// ```text
/// POST   /           -> subscribe
/// DELETE /{token}    -> unsubscribe
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(subscribers::subscribe))
        .route("/{token}", delete(subscribers::unsubscribe))
}
