//! Public candle endpoints: submit, list and report.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use memorial_core::candle::{parse_created_at, CandleStatus};
use memorial_core::error::CoreError;
use memorial_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::moderation::NewCandle;
use crate::query::PaginationParams;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

/// Request body for `POST /candles`.
///
/// Missing fields deserialize as empty and fail validation with a 400.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCandleRequest {
    #[serde(default)]
    pub writer_name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCandleResponse {
    pub success: bool,
    pub candle_id: DbId,
}

/// POST /api/v1/candles
pub async fn submit_candle(
    State(state): State<AppState>,
    Json(input): Json<SubmitCandleRequest>,
) -> AppResult<impl IntoResponse> {
    let created_at = parse_created_at(&input.created_at).map_err(CoreError::Validation)?;

    let candle = state
        .moderation()
        .submit(NewCandle {
            writer_name: input.writer_name,
            text: input.text,
            created_at,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmitCandleResponse {
                success: true,
                candle_id: candle.id,
            },
        }),
    ))
}

/// GET /api/v1/candles
///
/// Approved candles only, newest first.
pub async fn list_candles(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let candles = state
        .candles
        .list_by_status(CandleStatus::Approved, params.limit(), params.offset())
        .await?;
    Ok(Json(DataResponse { data: candles }))
}

/// POST /api/v1/candles/{id}/report
pub async fn report_candle(
    State(state): State<AppState>,
    Path(candle_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.moderation().report(candle_id).await?;
    Ok(Json(DataResponse {
        data: SuccessResponse::ok(),
    }))
}
