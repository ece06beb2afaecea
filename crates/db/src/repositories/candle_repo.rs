//! Repository for the `candles` table.

use memorial_core::candle::CandleStatus;
use memorial_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::candle::{Candle, CreateCandle};

/// Column list for candle queries.
const COLUMNS: &str = "id, writer_name, text, status, created_at, approved_at, \
    prompt_chat_id, prompt_message_id";

/// Provides CRUD operations for candles.
pub struct CandleRepo;

impl CandleRepo {
    /// Insert a new `Pending` candle, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCandle) -> Result<Candle, sqlx::Error> {
        let query = format!(
            "INSERT INTO candles (writer_name, text, status, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Candle>(&query)
            .bind(&input.writer_name)
            .bind(&input.text)
            .bind(CandleStatus::Pending.as_str())
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Candle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM candles WHERE id = $1");
        sqlx::query_as::<_, Candle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set the status of a candle. `approved_at` is only overwritten when a
    /// value is supplied.
    ///
    /// Returns `None` if the candle no longer exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: CandleStatus,
        approved_at: Option<Timestamp>,
    ) -> Result<Option<Candle>, sqlx::Error> {
        let query = format!(
            "UPDATE candles
             SET status = $2, approved_at = COALESCE($3, approved_at)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Candle>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(approved_at)
            .fetch_optional(pool)
            .await
    }

    /// Remember where the current moderation prompt was posted.
    pub async fn set_prompt(
        pool: &PgPool,
        id: DbId,
        chat_id: i64,
        message_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE candles SET prompt_chat_id = $2, prompt_message_id = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(chat_id)
        .bind(message_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a candle. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM candles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List candles in one status, newest `created_at` first.
    pub async fn list_by_status(
        pool: &PgPool,
        status: CandleStatus,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Candle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM candles
             WHERE status = $1
             ORDER BY created_at DESC, id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Candle>(&query)
            .bind(status.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
