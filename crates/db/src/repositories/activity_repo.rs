//! Repository for the append-only `activity_log` table.

use sqlx::PgPool;

use crate::models::activity::{ActivityEntry, CreateActivity};

const COLUMNS: &str = "id, action, candle_id, actor, details, created_at";

pub struct ActivityRepo;

impl ActivityRepo {
    pub async fn insert(pool: &PgPool, input: &CreateActivity) -> Result<ActivityEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_log (action, candle_id, actor, details)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityEntry>(&query)
            .bind(&input.action)
            .bind(input.candle_id)
            .bind(&input.actor)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// List recent entries, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ActivityEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_log
             ORDER BY created_at DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ActivityEntry>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
