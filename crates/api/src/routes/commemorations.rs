//! Public commemoration routes mounted at `/commemorations`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::commemorations;
use crate::state::AppState;

/// ```text
/// GET  /                       -> list_upcoming
/// POST /{id}/registrations     -> register
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(commemorations::list_upcoming))
        .route("/{id}/registrations", post(commemorations::register))
}
