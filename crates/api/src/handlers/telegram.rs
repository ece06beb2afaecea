//! Chat button callbacks.
//!
//! This endpoint carries no admin token: possession of the webhook URL (and
//! the optional secret header) is the whole trust boundary. It always
//! answers 200 so the chat platform does not redeliver; every failure is
//! logged and swallowed.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use memorial_core::error::CoreError;
use memorial_core::moderation::ModerationSource;
use memorial_core::prompt::{parse_callback_tag, PromptHandle};
use memorial_events::delivery::telegram::Update;

use crate::error::AppError;
use crate::state::AppState;

/// Header Telegram uses to echo the webhook secret.
pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// POST /api/v1/telegram/webhook
///
/// Order: parse, acknowledge the button press, apply the decision, edit the
/// prompt it came from. A press that can no longer apply clears the pressed
/// message's buttons instead.
pub async fn telegram_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    if let Some(expected) = state.webhook_secret.as_deref() {
        let provided = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
        if provided != Some(expected) {
            tracing::warn!("Telegram webhook call with missing or wrong secret ignored");
            return StatusCode::OK;
        }
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!(error = %e, "Unparseable Telegram update");
            return StatusCode::OK;
        }
    };

    let Some(query) = update.callback_query else {
        tracing::debug!(update_id = update.update_id, "Ignoring non-callback update");
        return StatusCode::OK;
    };

    state.notifier.acknowledge(&query.id).await.ignore();

    let Some(tag) = query.data.as_deref() else {
        tracing::warn!(callback_id = %query.id, "Callback without data");
        return StatusCode::OK;
    };

    let (event, candle_id) = match parse_callback_tag(tag) {
        Ok(parsed) => parsed,
        Err(reason) => {
            tracing::warn!(callback_id = %query.id, %reason, "Rejected callback tag");
            return StatusCode::OK;
        }
    };

    let prompt = query.message.as_ref().map(|m| PromptHandle {
        chat_id: m.chat.id,
        message_id: m.message_id,
    });
    let moderator = query.from.as_ref().map(|u| u.id);

    match state
        .moderation()
        .resolve(candle_id, event, ModerationSource::ChatCallback, prompt)
        .await
    {
        Ok(transition) => {
            tracing::info!(
                candle_id = %candle_id,
                moderator = ?moderator,
                outcome = transition.outcome_label(),
                "Chat moderation applied"
            );
        }
        Err(e) => {
            tracing::warn!(candle_id = %candle_id, event = %event, error = %e, "Chat moderation failed");
            // A stale prompt (candle gone or already decided) must not keep its buttons.
            let stale = matches!(
                e,
                AppError::Core(CoreError::NotFound { .. } | CoreError::Conflict(_))
            );
            if let Some(handle) = prompt.filter(|_| stale) {
                state.notifier.clear_buttons(handle).await.ignore();
            }
        }
    }

    StatusCode::OK
}
