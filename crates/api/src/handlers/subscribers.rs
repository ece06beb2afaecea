//! Email subscriptions for commemoration announcements.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use memorial_core::activity::{actions, actors};
use memorial_core::error::CoreError;
use memorial_core::side_effect::BestEffort;
use memorial_core::subscription::normalize_email;
use memorial_core::types::DbId;
use memorial_db::repositories::SubscriberRepo;
use memorial_events::delivery::email::subscription_confirmation;
use memorial_events::ActivityEvent;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: String,
}

/// POST /api/v1/subscribers
///
/// Idempotent. A confirmation mail is sent only for new subscriptions.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(input): Json<SubscribeRequest>,
) -> AppResult<impl IntoResponse> {
    let email = normalize_email(&input.email).map_err(CoreError::Validation)?;
    let (subscriber, created) = SubscriberRepo::subscribe(&state.pool, &email).await?;

    if created {
        tracing::info!(subscriber_id = %subscriber.id, "New subscriber");
        state.event_bus.publish(
            ActivityEvent::new(actions::SUBSCRIBER_ADDED, actors::VISITOR)
                .with_details(serde_json::json!({ "subscriberId": subscriber.id })),
        );

        if let Some(mailer) = &state.mailer {
            let message = subscription_confirmation(mailer.site_url(), subscriber.unsubscribe_token);
            let outcome: BestEffort<()> = mailer.send(&subscriber.email, &message).await.into();
            if let BestEffort::Failed(reason) = outcome {
                tracing::warn!(subscriber_id = %subscriber.id, %reason, "Confirmation email failed");
            }
        }
    }

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(DataResponse {
            data: SuccessResponse::ok(),
        }),
    ))
}

/// DELETE /api/v1/subscribers/{token}
pub async fn unsubscribe(
    State(state): State<AppState>,
    Path(token): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !SubscriberRepo::unsubscribe(&state.pool, token).await? {
        return Err(CoreError::NotFound {
            entity: "Subscription",
            id: token,
        }
        .into());
    }
    tracing::info!("Subscriber removed");
    Ok(Json(DataResponse {
        data: SuccessResponse::ok(),
    }))
}
