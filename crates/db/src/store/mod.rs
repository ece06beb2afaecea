//! Candle store seam.
//!
//! The moderation workflow only talks to the store through these traits, so
//! it can run against Postgres in production and against [`memory`] in tests.
//! No method retries; a failure surfaces as [`StoreError`].

use async_trait::async_trait;
use memorial_core::candle::CandleStatus;
use memorial_core::prompt::PromptHandle;
use memorial_core::types::{DbId, Timestamp};

use crate::models::candle::{Candle, CreateCandle};
use crate::models::forbidden_word::ForbiddenWord;

pub mod memory;
pub mod postgres;

pub use memory::{MemoryCandleStore, MemoryForbiddenWordStore};
pub use postgres::{PgCandleStore, PgForbiddenWordStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Persistent collection of candles.
#[async_trait]
pub trait CandleStore: Send + Sync {
    /// Insert a new `Pending` candle and return it with its assigned id.
    async fn create(&self, input: &CreateCandle) -> Result<Candle, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Candle>, StoreError>;

    /// Returns `None` if the candle vanished.
    async fn update_status(
        &self,
        id: DbId,
        status: CandleStatus,
        approved_at: Option<Timestamp>,
    ) -> Result<Option<Candle>, StoreError>;

    /// Record where the candle's current moderation prompt lives.
    async fn set_prompt(&self, id: DbId, handle: PromptHandle) -> Result<bool, StoreError>;

    /// Returns `false` if the candle was already gone.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    /// Candles in `status`, newest `created_at` first.
    async fn list_by_status(
        &self,
        status: CandleStatus,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Candle>, StoreError>;
}

/// Persistent list of forbidden words, kept in load order.
#[async_trait]
pub trait ForbiddenWordStore: Send + Sync {
    async fn list(&self) -> Result<Vec<ForbiddenWord>, StoreError>;

    /// Insert normalised words; returns only the newly added rows.
    async fn add(&self, words: &[String]) -> Result<Vec<ForbiddenWord>, StoreError>;

    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;
}
