use memorial_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `subscribers` table.
///
/// The unsubscribe token is only ever handed out in emails and the
/// subscribe response, never in admin listings.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: DbId,
    pub email: String,
    #[serde(skip_serializing)]
    pub unsubscribe_token: DbId,
    pub created_at: Timestamp,
}
