//! Commemorations: public listing and registration, admin creation.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{FixedOffset, Utc};
use memorial_core::activity::{actions, actors};
use memorial_core::commemoration::{validate_commemoration, validate_registration};
use memorial_core::error::CoreError;
use memorial_core::prompt::format_display_date;
use memorial_core::subscription::normalize_email;
use memorial_core::types::DbId;
use memorial_db::models::commemoration::{Commemoration, CreateCommemoration, CreateRegistration};
use memorial_db::models::subscriber::Subscriber;
use memorial_db::repositories::{
    CommemorationRepo, RegistrationOutcome, RegistrationRepo, SubscriberRepo,
};
use memorial_events::delivery::email::commemoration_announcement;
use memorial_events::{ActivityEvent, Mailer};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn commemoration_not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Commemoration",
        id,
    }
}

/// GET /api/v1/commemorations
///
/// Upcoming commemorations with their current registration totals.
pub async fn list_upcoming(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = CommemorationRepo::list_upcoming(&state.pool, Utc::now()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/commemorations/{id}/registrations
pub async fn register(
    State(state): State<AppState>,
    Path(commemoration_id): Path<DbId>,
    Json(input): Json<CreateRegistration>,
) -> AppResult<impl IntoResponse> {
    validate_registration(&input.full_name, input.participants).map_err(CoreError::Validation)?;
    let input = CreateRegistration {
        full_name: input.full_name.trim().to_string(),
        email: normalize_email(&input.email).map_err(CoreError::Validation)?,
        participants: input.participants,
    };

    match RegistrationRepo::create_checked(&state.pool, commemoration_id, &input).await? {
        RegistrationOutcome::Registered(registration) => {
            tracing::info!(
                commemoration_id = %commemoration_id,
                participants = registration.participants,
                "Commemoration registration"
            );
            Ok((StatusCode::CREATED, Json(DataResponse { data: registration })))
        }
        RegistrationOutcome::CommemorationNotFound => {
            Err(commemoration_not_found(commemoration_id).into())
        }
        RegistrationOutcome::Full(reason) => Err(CoreError::Conflict(reason).into()),
    }
}

/// POST /api/v1/admin/commemorations
///
/// Subscribers are notified in the background; mail failures never affect
/// the response.
pub async fn create_commemoration(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCommemoration>,
) -> AppResult<impl IntoResponse> {
    validate_commemoration(&input.title, input.capacity).map_err(CoreError::Validation)?;
    let input = CreateCommemoration {
        title: input.title.trim().to_string(),
        description: input.description.trim().to_string(),
        location: input.location.trim().to_string(),
        ..input
    };

    let commemoration = CommemorationRepo::create(&state.pool, &input).await?;
    tracing::info!(commemoration_id = %commemoration.id, "Commemoration created");
    state.event_bus.publish(
        ActivityEvent::new(actions::COMMEMORATION_CREATED, actors::ADMIN)
            .with_details(serde_json::json!({ "commemorationId": commemoration.id })),
    );

    if let Some(mailer) = state.mailer.clone() {
        match SubscriberRepo::list_all(&state.pool).await {
            Ok(subscribers) => {
                tokio::spawn(announce(
                    mailer,
                    subscribers,
                    commemoration.clone(),
                    state.config.display_offset,
                ));
            }
            Err(e) => tracing::warn!(error = %e, "Could not load subscribers for announcement"),
        }
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: commemoration })))
}

/// Email every subscriber about a new commemoration. One attempt each.
async fn announce(
    mailer: Arc<dyn Mailer>,
    subscribers: Vec<Subscriber>,
    commemoration: Commemoration,
    offset: FixedOffset,
) {
    let starts_at = format_display_date(commemoration.starts_at, offset);
    let mut failed = 0usize;
    for subscriber in &subscribers {
        let message = commemoration_announcement(
            mailer.site_url(),
            subscriber.unsubscribe_token,
            &commemoration.title,
            &commemoration.location,
            &starts_at,
        );
        if let Err(e) = mailer.send(&subscriber.email, &message).await {
            failed += 1;
            tracing::warn!(subscriber_id = %subscriber.id, error = %e, "Announcement email failed");
        }
    }
    tracing::info!(
        commemoration_id = %commemoration.id,
        sent = subscribers.len() - failed,
        failed,
        "Commemoration announcement finished"
    );
}

/// GET /api/v1/admin/commemorations/{id}/registrations
pub async fn list_registrations(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(commemoration_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    CommemorationRepo::find_by_id(&state.pool, commemoration_id)
        .await?
        .ok_or_else(|| commemoration_not_found(commemoration_id))?;

    let registrations =
        RegistrationRepo::list_for_commemoration(&state.pool, commemoration_id).await?;
    Ok(Json(DataResponse { data: registrations }))
}
