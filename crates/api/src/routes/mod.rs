pub mod admin;
pub mod candles;
pub mod commemorations;
pub mod health;
pub mod subscribers;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /candles                                   list approved, submit (GET, POST)
/// /candles/{id}/report                       viewer report (POST)
///
/// /admin/login                               password login (POST)
/// /admin/candles                             moderation queue (GET, ?status)
/// /admin/candles/moderate                    approve / reject (POST)
/// /admin/forbidden-words                     list, add (GET, POST)
/// /admin/forbidden-words/{id}                delete (DELETE)
/// /admin/activity                            activity log (GET)
/// /admin/commemorations                      create (POST)
/// /admin/commemorations/{id}/registrations   list registrations (GET)
///
/// /telegram/webhook                          chat button callbacks (POST)
///
/// /subscribers                               subscribe (POST)
/// /subscribers/{token}                       unsubscribe (DELETE)
///
/// /commemorations                            upcoming (GET)
/// /commemorations/{id}/registrations         register (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/candles", candles::router())
        .nest("/admin", admin::router())
        .route(
            "/telegram/webhook",
            post(handlers::telegram::telegram_webhook),
        )
        .nest("/subscribers", subscribers::router())
        .nest("/commemorations", commemorations::router())
}
