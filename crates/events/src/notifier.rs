//! Moderation prompts in the moderators' chat.
//!
//! Every method is best-effort. A failure is logged here and reported as
//! [`BestEffort::Failed`]; it never undoes the store change that triggered it.

use async_trait::async_trait;
use chrono::FixedOffset;
use memorial_core::moderation::ModerationEvent;
use memorial_core::prompt::{
    compose_prompt, compose_resolved, encode_callback_tag, PromptFraming, PromptHandle,
    BUTTON_APPROVE, BUTTON_DELETE,
};
use memorial_core::side_effect::BestEffort;
use memorial_db::models::candle::Candle;

use crate::delivery::telegram::{InlineKeyboardButton, InlineKeyboardMarkup, TelegramClient};

#[async_trait]
pub trait ModerationNotifier: Send + Sync {
    /// Post a prompt with approve/delete buttons for `candle`.
    async fn post_prompt(&self, candle: &Candle, framing: PromptFraming) -> BestEffort<PromptHandle>;

    /// Rewrite a prompt with its result line and remove the buttons.
    async fn resolve_prompt(
        &self,
        handle: PromptHandle,
        candle: &Candle,
        framing: PromptFraming,
        result: &str,
    ) -> BestEffort<()>;

    /// Drop the buttons of a prompt that can no longer be acted on.
    async fn clear_buttons(&self, handle: PromptHandle) -> BestEffort<()>;

    /// Answer a button press so the client stops waiting.
    async fn acknowledge(&self, callback_id: &str) -> BestEffort<()>;

    /// Whether prompts actually reach a chat.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Two-button keyboard whose tags carry the candle id.
pub fn moderation_keyboard(candle: &Candle) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: vec![vec![
            InlineKeyboardButton {
                text: BUTTON_APPROVE.to_string(),
                callback_data: encode_callback_tag(ModerationEvent::Approve, candle.id),
            },
            InlineKeyboardButton {
                text: BUTTON_DELETE.to_string(),
                callback_data: encode_callback_tag(ModerationEvent::Delete, candle.id),
            },
        ]],
    }
}

pub struct TelegramNotifier {
    client: TelegramClient,
    display_offset: FixedOffset,
}

impl TelegramNotifier {
    pub fn new(client: TelegramClient, display_offset: FixedOffset) -> Self {
        Self {
            client,
            display_offset,
        }
    }
}

#[async_trait]
impl ModerationNotifier for TelegramNotifier {
    async fn post_prompt(&self, candle: &Candle, framing: PromptFraming) -> BestEffort<PromptHandle> {
        let chat_id = self.client.config().chat_id;
        let text = compose_prompt(&candle.prompt_view(), framing, self.display_offset);

        match self
            .client
            .send_message(chat_id, &text, &moderation_keyboard(candle))
            .await
        {
            Ok(message_id) => {
                tracing::debug!(candle_id = %candle.id, message_id, "Moderation prompt posted");
                BestEffort::Done(PromptHandle {
                    chat_id,
                    message_id,
                })
            }
            Err(e) => {
                tracing::warn!(candle_id = %candle.id, error = %e, "Failed to post moderation prompt");
                BestEffort::Failed(e.to_string())
            }
        }
    }

    async fn resolve_prompt(
        &self,
        handle: PromptHandle,
        candle: &Candle,
        framing: PromptFraming,
        result: &str,
    ) -> BestEffort<()> {
        let text = compose_resolved(&candle.prompt_view(), framing, self.display_offset, result);

        let outcome = self
            .client
            .edit_message_text(handle.chat_id, handle.message_id, &text)
            .await;
        if let Err(e) = &outcome {
            tracing::warn!(
                candle_id = %candle.id,
                message_id = handle.message_id,
                error = %e,
                "Failed to resolve moderation prompt"
            );
        }
        outcome.into()
    }

    async fn clear_buttons(&self, handle: PromptHandle) -> BestEffort<()> {
        let outcome = self
            .client
            .remove_keyboard(handle.chat_id, handle.message_id)
            .await;
        if let Err(e) = &outcome {
            tracing::warn!(message_id = handle.message_id, error = %e, "Failed to clear prompt buttons");
        }
        outcome.into()
    }

    async fn acknowledge(&self, callback_id: &str) -> BestEffort<()> {
        let outcome = self.client.answer_callback_query(callback_id, None).await;
        if let Err(e) = &outcome {
            tracing::warn!(callback_id, error = %e, "Failed to answer callback query");
        }
        outcome.into()
    }
}

/// Notifier used when no chat is configured. Every call is skipped.
#[derive(Debug, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl ModerationNotifier for DisabledNotifier {
    async fn post_prompt(&self, _candle: &Candle, _framing: PromptFraming) -> BestEffort<PromptHandle> {
        BestEffort::Skipped
    }

    async fn resolve_prompt(
        &self,
        _handle: PromptHandle,
        _candle: &Candle,
        _framing: PromptFraming,
        _result: &str,
    ) -> BestEffort<()> {
        BestEffort::Skipped
    }

    async fn clear_buttons(&self, _handle: PromptHandle) -> BestEffort<()> {
        BestEffort::Skipped
    }

    async fn acknowledge(&self, _callback_id: &str) -> BestEffort<()> {
        BestEffort::Skipped
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
