//! Repository for the `subscribers` table.

use memorial_core::types::DbId;
use sqlx::PgPool;

use crate::models::subscriber::Subscriber;

const COLUMNS: &str = "id, email, unsubscribe_token, created_at";

pub struct SubscriberRepo;

impl SubscriberRepo {
    /// Subscribe an already-normalised email address.
    ///
    /// Idempotent: an existing subscription is returned unchanged. The flag
    /// is `true` only when a new row was inserted.
    pub async fn subscribe(pool: &PgPool, email: &str) -> Result<(Subscriber, bool), sqlx::Error> {
        let query = format!(
            "INSERT INTO subscribers (email) VALUES ($1)
             ON CONFLICT (email) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Subscriber>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await?;
        if let Some(subscriber) = inserted {
            return Ok((subscriber, true));
        }

        let query = format!("SELECT {COLUMNS} FROM subscribers WHERE email = $1");
        let existing = sqlx::query_as::<_, Subscriber>(&query)
            .bind(email)
            .fetch_one(pool)
            .await?;
        Ok((existing, false))
    }

    /// Remove the subscription owning `token`. Returns `true` if one existed.
    pub async fn unsubscribe(pool: &PgPool, token: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subscribers WHERE unsubscribe_token = $1")
            .bind(token)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Subscriber>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscribers ORDER BY created_at");
        sqlx::query_as::<_, Subscriber>(&query).fetch_all(pool).await
    }
}
