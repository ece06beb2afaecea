//! Activity log models.

use memorial_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `activity_log` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: DbId,
    pub action: String,
    pub candle_id: Option<DbId>,
    pub actor: String,
    pub details: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for appending an activity entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivity {
    pub action: String,
    pub candle_id: Option<DbId>,
    pub actor: String,
    pub details: serde_json::Value,
}
