//! Postgres-backed stores, delegating to the repositories.

use async_trait::async_trait;
use memorial_core::candle::CandleStatus;
use memorial_core::prompt::PromptHandle;
use memorial_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use super::{CandleStore, ForbiddenWordStore, StoreError};
use crate::models::candle::{Candle, CreateCandle};
use crate::models::forbidden_word::ForbiddenWord;
use crate::repositories::{CandleRepo, ForbiddenWordRepo};

#[derive(Debug, Clone)]
pub struct PgCandleStore {
    pool: PgPool,
}

impl PgCandleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandleStore for PgCandleStore {
    async fn create(&self, input: &CreateCandle) -> Result<Candle, StoreError> {
        Ok(CandleRepo::create(&self.pool, input).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Candle>, StoreError> {
        Ok(CandleRepo::find_by_id(&self.pool, id).await?)
    }

    async fn update_status(
        &self,
        id: DbId,
        status: CandleStatus,
        approved_at: Option<Timestamp>,
    ) -> Result<Option<Candle>, StoreError> {
        Ok(CandleRepo::update_status(&self.pool, id, status, approved_at).await?)
    }

    async fn set_prompt(&self, id: DbId, handle: PromptHandle) -> Result<bool, StoreError> {
        Ok(CandleRepo::set_prompt(&self.pool, id, handle.chat_id, handle.message_id).await?)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(CandleRepo::delete(&self.pool, id).await?)
    }

    async fn list_by_status(
        &self,
        status: CandleStatus,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Candle>, StoreError> {
        Ok(CandleRepo::list_by_status(&self.pool, status, limit, offset).await?)
    }
}

#[derive(Debug, Clone)]
pub struct PgForbiddenWordStore {
    pool: PgPool,
}

impl PgForbiddenWordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ForbiddenWordStore for PgForbiddenWordStore {
    async fn list(&self) -> Result<Vec<ForbiddenWord>, StoreError> {
        Ok(ForbiddenWordRepo::list(&self.pool).await?)
    }

    async fn add(&self, words: &[String]) -> Result<Vec<ForbiddenWord>, StoreError> {
        Ok(ForbiddenWordRepo::add_many(&self.pool, words).await?)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ForbiddenWordRepo::delete(&self.pool, id).await?)
    }
}
