//! The candle moderation workflow shared by every entry point.
//!
//! Submission, viewer reports, the admin panel and chat buttons are thin
//! adapters over [`Moderation`]. Store writes are the durable effect; chat
//! prompts and activity entries are best-effort and never fail a call.

use chrono::Utc;
use memorial_core::activity::{action_for_effect, actions, actor_for_source, actors};
use memorial_core::candle::{validate_candle_fields, CandleStatus};
use memorial_core::error::CoreError;
use memorial_core::moderation::{transition, Effect, ModerationEvent, ModerationSource, Transition};
use memorial_core::prompt::{PromptFraming, PromptHandle, RESULT_SUPERSEDED};
use memorial_core::side_effect::BestEffort;
use memorial_core::types::{DbId, Timestamp};
use memorial_core::word_filter::check_submission;
use memorial_db::models::candle::{Candle, CreateCandle};
use memorial_db::store::{CandleStore, ForbiddenWordStore};
use memorial_events::{ActivityEvent, EventBus, ModerationNotifier};
use serde_json::json;

use crate::error::AppResult;

/// A validated-at-the-boundary submission.
#[derive(Debug, Clone)]
pub struct NewCandle {
    pub writer_name: String,
    pub text: String,
    pub created_at: Timestamp,
}

pub struct Moderation<'a> {
    candles: &'a dyn CandleStore,
    words: &'a dyn ForbiddenWordStore,
    notifier: &'a dyn ModerationNotifier,
    events: &'a EventBus,
}

fn candle_not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Candle",
        id,
    }
}

impl<'a> Moderation<'a> {
    pub fn new(
        candles: &'a dyn CandleStore,
        words: &'a dyn ForbiddenWordStore,
        notifier: &'a dyn ModerationNotifier,
        events: &'a EventBus,
    ) -> Self {
        Self {
            candles,
            words,
            notifier,
            events,
        }
    }

    /// Accept a new candle into the moderation queue.
    ///
    /// Fields are trimmed and length-checked, then filtered. A blocked
    /// submission writes nothing to the store.
    pub async fn submit(&self, input: NewCandle) -> AppResult<Candle> {
        validate_candle_fields(&input.writer_name, &input.text).map_err(CoreError::Validation)?;
        let writer_name = input.writer_name.trim();
        let text = input.text.trim();

        let words: Vec<String> = self
            .words
            .list()
            .await?
            .into_iter()
            .map(|w| w.word)
            .collect();

        if let Err(err) = check_submission(writer_name, text, &words) {
            if let CoreError::Blocked { word, field } = &err {
                tracing::info!(word = %word, field = %field, "Candle submission blocked");
                self.events.publish(
                    ActivityEvent::new(actions::CANDLE_BLOCKED, actors::VISITOR)
                        .with_details(json!({ "word": word, "field": field })),
                );
            }
            return Err(err.into());
        }

        let candle = self
            .candles
            .create(&CreateCandle {
                writer_name: writer_name.to_string(),
                text: text.to_string(),
                created_at: input.created_at,
            })
            .await?;

        tracing::info!(candle_id = %candle.id, "Candle submitted");

        self.post_prompt(&candle, PromptFraming::New).await;
        self.events.publish(
            ActivityEvent::new(actions::CANDLE_SUBMITTED, actors::VISITOR)
                .with_candle(candle.id)
                .with_details(json!({ "writerName": candle.writer_name })),
        );

        Ok(candle)
    }

    /// Apply `event` to a candle through the state machine.
    ///
    /// `prompt` is the chat message the decision came from, if any; otherwise
    /// the candle's stored prompt is resolved. A candle that is gone, or that
    /// vanishes between read and write, yields `NotFound` with no side effects.
    pub async fn resolve(
        &self,
        candle_id: DbId,
        event: ModerationEvent,
        source: ModerationSource,
        prompt: Option<PromptHandle>,
    ) -> AppResult<Transition> {
        let candle = self
            .candles
            .find_by_id(candle_id)
            .await?
            .ok_or_else(|| candle_not_found(candle_id))?;

        let transition = transition(candle.status, event)?;

        let current = match transition.effect {
            Effect::Approve => self
                .candles
                .update_status(candle_id, CandleStatus::Approved, Some(Utc::now()))
                .await?
                .ok_or_else(|| candle_not_found(candle_id))?,
            Effect::Delete => {
                if !self.candles.delete(candle_id).await? {
                    return Err(candle_not_found(candle_id).into());
                }
                candle.clone()
            }
            Effect::Report => {
                let reported = self
                    .candles
                    .update_status(candle_id, CandleStatus::Reported, None)
                    .await?
                    .ok_or_else(|| candle_not_found(candle_id))?;
                if transition.supersedes_report() {
                    if let Some(previous) = candle.prompt_handle() {
                        self.notifier
                            .resolve_prompt(
                                previous,
                                &reported,
                                PromptFraming::Reported,
                                RESULT_SUPERSEDED,
                            )
                            .await
                            .ignore();
                    }
                }
                self.post_prompt(&reported, PromptFraming::Reported).await;
                reported
            }
        };

        tracing::info!(
            candle_id = %candle_id,
            from = %transition.from,
            event = %event,
            outcome = transition.outcome_label(),
            source = source.as_str(),
            "Moderation transition applied"
        );

        if let Some(result) = transition.resolution_text() {
            let framing = if transition.resolves_report() {
                PromptFraming::Reported
            } else {
                PromptFraming::New
            };
            if let Some(handle) = prompt.or_else(|| candle.prompt_handle()) {
                self.notifier
                    .resolve_prompt(handle, &current, framing, result)
                    .await
                    .ignore();
            }
        }

        self.events.publish(
            ActivityEvent::new(action_for_effect(transition.effect), actor_for_source(source))
                .with_candle(candle_id)
                .with_details(json!({
                    "source": source,
                    "from": transition.from,
                    "to": transition.outcome_label(),
                })),
        );

        Ok(transition)
    }

    /// A viewer flags a published candle.
    pub async fn report(&self, candle_id: DbId) -> AppResult<Transition> {
        self.resolve(
            candle_id,
            ModerationEvent::Report,
            ModerationSource::Viewer,
            None,
        )
        .await
    }

    /// Post a prompt and remember where it went. Failures only log.
    async fn post_prompt(&self, candle: &Candle, framing: PromptFraming) {
        let BestEffort::Done(handle) = self.notifier.post_prompt(candle, framing).await else {
            return;
        };
        if let Err(e) = self.candles.set_prompt(candle.id, handle).await {
            tracing::warn!(candle_id = %candle.id, error = %e, "Failed to store prompt handle");
        }
    }
}
