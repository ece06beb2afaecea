use memorial_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `forbidden_words` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForbiddenWord {
    pub id: DbId,
    pub word: String,
    pub created_at: Timestamp,
}
