//! Repository for the `forbidden_words` table.

use memorial_core::types::DbId;
use sqlx::PgPool;

use crate::models::forbidden_word::ForbiddenWord;

const COLUMNS: &str = "id, word, created_at";

pub struct ForbiddenWordRepo;

impl ForbiddenWordRepo {
    /// All forbidden words in load order (oldest first).
    pub async fn list(pool: &PgPool) -> Result<Vec<ForbiddenWord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM forbidden_words ORDER BY created_at, id");
        sqlx::query_as::<_, ForbiddenWord>(&query)
            .fetch_all(pool)
            .await
    }

    /// Insert already-normalised words, skipping ones that exist.
    ///
    /// Returns only the rows that were actually inserted, in input order.
    pub async fn add_many(
        pool: &PgPool,
        words: &[String],
    ) -> Result<Vec<ForbiddenWord>, sqlx::Error> {
        let query = format!(
            "INSERT INTO forbidden_words (word)
             SELECT w FROM UNNEST($1::text[]) WITH ORDINALITY AS t(w, n) ORDER BY n
             ON CONFLICT (word) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ForbiddenWord>(&query)
            .bind(words)
            .fetch_all(pool)
            .await
    }

    /// Remove a forbidden word. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM forbidden_words WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
