//! In-memory stores for tests and local runs without Postgres.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use memorial_core::candle::CandleStatus;
use memorial_core::prompt::PromptHandle;
use memorial_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use super::{CandleStore, ForbiddenWordStore, StoreError};
use crate::models::candle::{Candle, CreateCandle};
use crate::models::forbidden_word::ForbiddenWord;

#[derive(Debug, Default)]
pub struct MemoryCandleStore {
    candles: RwLock<HashMap<DbId, Candle>>,
}

impl MemoryCandleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of candles currently held, in any status.
    pub async fn len(&self) -> usize {
        self.candles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.candles.read().await.is_empty()
    }
}

#[async_trait]
impl CandleStore for MemoryCandleStore {
    async fn create(&self, input: &CreateCandle) -> Result<Candle, StoreError> {
        let candle = Candle {
            id: DbId::new_v4(),
            writer_name: input.writer_name.clone(),
            text: input.text.clone(),
            status: CandleStatus::Pending,
            created_at: input.created_at,
            approved_at: None,
            prompt_chat_id: None,
            prompt_message_id: None,
        };
        self.candles.write().await.insert(candle.id, candle.clone());
        Ok(candle)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Candle>, StoreError> {
        Ok(self.candles.read().await.get(&id).cloned())
    }

    async fn update_status(
        &self,
        id: DbId,
        status: CandleStatus,
        approved_at: Option<Timestamp>,
    ) -> Result<Option<Candle>, StoreError> {
        let mut candles = self.candles.write().await;
        let Some(candle) = candles.get_mut(&id) else {
            return Ok(None);
        };
        candle.status = status;
        if approved_at.is_some() {
            candle.approved_at = approved_at;
        }
        Ok(Some(candle.clone()))
    }

    async fn set_prompt(&self, id: DbId, handle: PromptHandle) -> Result<bool, StoreError> {
        let mut candles = self.candles.write().await;
        match candles.get_mut(&id) {
            Some(candle) => {
                candle.prompt_chat_id = Some(handle.chat_id);
                candle.prompt_message_id = Some(handle.message_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.candles.write().await.remove(&id).is_some())
    }

    async fn list_by_status(
        &self,
        status: CandleStatus,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Candle>, StoreError> {
        let candles = self.candles.read().await;
        let mut matching: Vec<Candle> = candles
            .values()
            .filter(|c| c.status == status)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .collect())
    }
}

/// Forbidden words kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryForbiddenWordStore {
    words: RwLock<Vec<ForbiddenWord>>,
}

impl MemoryForbiddenWordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ForbiddenWordStore for MemoryForbiddenWordStore {
    async fn list(&self) -> Result<Vec<ForbiddenWord>, StoreError> {
        Ok(self.words.read().await.clone())
    }

    async fn add(&self, words: &[String]) -> Result<Vec<ForbiddenWord>, StoreError> {
        let mut stored = self.words.write().await;
        let mut added = Vec::new();
        for word in words {
            if stored.iter().any(|w| &w.word == word) {
                continue;
            }
            let row = ForbiddenWord {
                id: DbId::new_v4(),
                word: word.clone(),
                created_at: Utc::now(),
            };
            stored.push(row.clone());
            added.push(row);
        }
        Ok(added)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let mut stored = self.words.write().await;
        let before = stored.len();
        stored.retain(|w| w.id != id);
        Ok(stored.len() != before)
    }
}
