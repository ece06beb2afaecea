//! Admin routes mounted at `/admin`.
//!
//! Everything except `/login` and `/candles/moderate` is guarded by the
//! `RequireAdmin` extractor. The moderate endpoint carries its token in the
//! request body and checks it itself.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{activity, admin, commemorations, forbidden_words};
use crate::state::AppState;

/// ```text
/// POST   /login                                -> login
/// GET    /candles                              -> list_candle_queue
/// POST   /candles/moderate                     -> moderate_candle
/// GET    /forbidden-words                      -> list_forbidden_words
/// POST   /forbidden-words                      -> add_forbidden_words
/// DELETE /forbidden-words/{id}                 -> delete_forbidden_word
/// GET    /activity                             -> list_activity
/// POST   /commemorations                       -> create_commemoration
/// GET    /commemorations/{id}/registrations    -> list_registrations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin::login))
        .route("/candles", get(admin::list_candle_queue))
        .route("/candles/moderate", post(admin::moderate_candle))
        .route(
            "/forbidden-words",
            get(forbidden_words::list_forbidden_words).post(forbidden_words::add_forbidden_words),
        )
        .route(
            "/forbidden-words/{id}",
            delete(forbidden_words::delete_forbidden_word),
        )
        .route("/activity", get(activity::list_activity))
        .route("/commemorations", post(commemorations::create_commemoration))
        .route(
            "/commemorations/{id}/registrations",
            get(commemorations::list_registrations),
        )
}
