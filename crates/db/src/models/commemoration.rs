//! Commemoration event and registration models.

use memorial_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `commemorations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Commemoration {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_at: Timestamp,
    /// `None` means unlimited.
    pub capacity: Option<i32>,
    pub created_at: Timestamp,
}

/// A commemoration together with its current registration total.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommemorationSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub commemoration: Commemoration,
    pub registered_participants: i64,
}

/// DTO for creating a commemoration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommemoration {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub starts_at: Timestamp,
    pub capacity: Option<i32>,
}

/// A row from the `commemoration_registrations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: DbId,
    pub commemoration_id: DbId,
    pub full_name: String,
    pub email: String,
    pub participants: i32,
    pub created_at: Timestamp,
}

/// DTO for registering to a commemoration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistration {
    pub full_name: String,
    pub email: String,
    pub participants: i32,
}
