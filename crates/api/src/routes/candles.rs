//! Public candle routes mounted at `/candles`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::candles;
use crate::state::AppState;

/// ```text
/// GET  /              -> list_candles
/// POST /              -> submit_candle
/// POST /{id}/report   -> report_candle
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(candles::list_candles).post(candles::submit_candle))
        .route("/{id}/report", post(candles::report_candle))
}
