//! Admin panel: login, the moderation queue and moderation decisions.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use memorial_core::activity::{actions, actors};
use memorial_core::candle::CandleStatus;
use memorial_core::error::CoreError;
use memorial_core::moderation::{AdminAction, ModerationSource};
use memorial_core::roles::ROLE_ADMIN;
use memorial_core::types::DbId;
use memorial_events::ActivityEvent;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, require_admin_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Request body for `POST /admin/candles/moderate`.
///
/// Every field is optional on the wire so that the token check can run
/// before argument validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerateRequest {
    pub candle_id: Option<String>,
    pub action: Option<String>,
    pub admin_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ModerateResponse {
    pub success: bool,
    /// `"Approved"` or `"Deleted"`.
    pub status: &'static str,
}

/// Query for the moderation queue. `status` defaults to `pending`.
#[derive(Debug, Deserialize)]
pub struct CandleQueueParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/login
///
/// Exchange the shared admin password for an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    let valid = verify_password(&input.password, &state.config.admin_password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !valid {
        tracing::warn!("Failed admin login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid password".into(),
        )));
    }

    let access_token = generate_access_token(ROLE_ADMIN, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    state
        .event_bus
        .publish(ActivityEvent::new(actions::ADMIN_LOGIN, actors::ADMIN));
    tracing::info!("Admin logged in");

    Ok(Json(DataResponse {
        data: LoginResponse {
            access_token,
            expires_in: state.config.jwt.expires_in(),
        },
    }))
}

/// POST /api/v1/admin/candles/moderate
///
/// Approve or reject a candle. The token travels in the body and is checked
/// before anything else.
pub async fn moderate_candle(
    State(state): State<AppState>,
    Json(input): Json<ModerateRequest>,
) -> AppResult<Json<DataResponse<ModerateResponse>>> {
    require_admin_token(input.admin_token.as_deref(), &state.config.jwt)?;

    let candle_id = input
        .candle_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::Validation("candleId is required".into()))?;
    let candle_id: DbId = candle_id
        .parse()
        .map_err(|_| CoreError::Validation(format!("Invalid candleId '{candle_id}'")))?;

    let action: AdminAction = input
        .action
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::Validation("action is required".into()))?
        .parse()
        .map_err(CoreError::Validation)?;

    let transition = state
        .moderation()
        .resolve(candle_id, action.event(), ModerationSource::AdminPanel, None)
        .await?;

    Ok(Json(DataResponse {
        data: ModerateResponse {
            success: true,
            status: transition.outcome_label(),
        },
    }))
}

/// GET /api/v1/admin/candles?status=pending|approved|reported
pub async fn list_candle_queue(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<CandleQueueParams>,
) -> AppResult<impl IntoResponse> {
    let status = match params.status.as_deref() {
        None => CandleStatus::Pending,
        Some(raw) => raw.parse().map_err(CoreError::Validation)?,
    };
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let candles = state.candles.list_by_status(status, limit, offset).await?;
    Ok(Json(DataResponse { data: candles }))
}
