use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use memorial_db::repositories::ActivityRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/activity
///
/// Most recent activity log entries first.
pub async fn list_activity(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let entries = ActivityRepo::list_recent(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(DataResponse { data: entries }))
}
