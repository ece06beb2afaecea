//! Admin management of the forbidden-word list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use memorial_core::activity::{actions, actors};
use memorial_core::error::CoreError;
use memorial_core::types::DbId;
use memorial_core::word_filter::normalize_word;
use memorial_events::ActivityEvent;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddForbiddenWordsRequest {
    #[serde(default)]
    pub words: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddForbiddenWordsResponse {
    /// Number of words that were not already on the list.
    pub added_words: usize,
    /// The newly added words, normalised.
    pub words: Vec<String>,
}

/// Trim, lowercase and de-duplicate, keeping first-seen order.
pub fn normalize_words(raw: &[String]) -> Vec<String> {
    let mut words: Vec<String> = Vec::with_capacity(raw.len());
    for word in raw.iter().filter_map(|w| normalize_word(w)) {
        if !words.contains(&word) {
            words.push(word);
        }
    }
    words
}

/// GET /api/v1/admin/forbidden-words
pub async fn list_forbidden_words(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let words = state.forbidden_words.list().await?;
    Ok(Json(DataResponse { data: words }))
}

/// POST /api/v1/admin/forbidden-words
pub async fn add_forbidden_words(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<AddForbiddenWordsRequest>,
) -> AppResult<impl IntoResponse> {
    let words = normalize_words(&input.words);
    if words.is_empty() {
        return Err(CoreError::Validation("words must contain at least one non-empty word".into()).into());
    }

    let added: Vec<String> = state
        .forbidden_words
        .add(&words)
        .await?
        .into_iter()
        .map(|w| w.word)
        .collect();

    tracing::info!(requested = words.len(), added = added.len(), "Forbidden words added");
    state.event_bus.publish(
        ActivityEvent::new(actions::FORBIDDEN_WORDS_ADDED, actors::ADMIN)
            .with_details(json!({ "words": added })),
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AddForbiddenWordsResponse {
                added_words: added.len(),
                words: added,
            },
        }),
    ))
}

/// DELETE /api/v1/admin/forbidden-words/{id}
pub async fn delete_forbidden_word(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !state.forbidden_words.delete(id).await? {
        return Err(CoreError::NotFound {
            entity: "ForbiddenWord",
            id,
        }
        .into());
    }

    state.event_bus.publish(
        ActivityEvent::new(actions::FORBIDDEN_WORD_DELETED, actors::ADMIN)
            .with_details(json!({ "id": id })),
    );

    Ok(Json(DataResponse {
        data: SuccessResponse::ok(),
    }))
}
