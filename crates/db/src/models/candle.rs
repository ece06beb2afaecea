//! Candle entity model.

use memorial_core::candle::CandleStatus;
use memorial_core::prompt::{PromptHandle, PromptView};
use memorial_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `candles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    pub id: DbId,
    pub writer_name: String,
    pub text: String,
    #[sqlx(try_from = "String")]
    pub status: CandleStatus,
    pub created_at: Timestamp,
    pub approved_at: Option<Timestamp>,
    #[serde(skip_serializing)]
    pub prompt_chat_id: Option<i64>,
    #[serde(skip_serializing)]
    pub prompt_message_id: Option<i64>,
}

impl Candle {
    pub fn prompt_view(&self) -> PromptView<'_> {
        PromptView {
            id: self.id,
            writer_name: &self.writer_name,
            text: &self.text,
            status: self.status,
            created_at: self.created_at,
        }
    }

    /// Where the most recent moderation prompt for this candle was posted.
    pub fn prompt_handle(&self) -> Option<PromptHandle> {
        match (self.prompt_chat_id, self.prompt_message_id) {
            (Some(chat_id), Some(message_id)) => Some(PromptHandle {
                chat_id,
                message_id,
            }),
            _ => None,
        }
    }
}

/// DTO for inserting a new candle. Status always starts as `Pending`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandle {
    pub writer_name: String,
    pub text: String,
    pub created_at: Timestamp,
}
