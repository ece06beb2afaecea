//! Moderation prompt text and the callback tag carried by its buttons.
//!
//! The tag (`approve_<id>` / `delete_<id>`) is the only state shared between
//! posting a prompt and handling a button press, so it must stay parseable
//! for every prompt still sitting in the moderators' chat.

use chrono::FixedOffset;

use crate::candle::CandleStatus;
use crate::moderation::ModerationEvent;
use crate::types::{DbId, Timestamp};

/// Separator between the action and the candle id in a callback tag.
pub const TAG_SEPARATOR: char = '_';

/// Header for a freshly submitted candle.
pub const HEADER_NEW: &str = "🕯️ New candle awaiting approval";

/// Header for a published candle that a viewer reported.
pub const HEADER_REPORTED: &str = "⚠️ URGENT: a published candle was reported";

/// Button label for approving.
pub const BUTTON_APPROVE: &str = "✅ Approve";

/// Button label for deleting.
pub const BUTTON_DELETE: &str = "🗑️ Delete";

/// Result line for a report prompt replaced by a newer report.
pub const RESULT_SUPERSEDED: &str = "Superseded by a new report";

/// Display format for dates shown to moderators.
pub const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Location of a posted prompt in the moderators' chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptHandle {
    pub chat_id: i64,
    pub message_id: i64,
}

/// How a prompt is framed for moderators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptFraming {
    New,
    Reported,
}

impl PromptFraming {
    pub fn header(self) -> &'static str {
        match self {
            PromptFraming::New => HEADER_NEW,
            PromptFraming::Reported => HEADER_REPORTED,
        }
    }
}

/// The candle fields that appear in a prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptView<'a> {
    pub id: DbId,
    pub writer_name: &'a str,
    pub text: &'a str,
    pub status: CandleStatus,
    pub created_at: Timestamp,
}

/// Build the callback tag for a button.
pub fn encode_callback_tag(event: ModerationEvent, candle_id: DbId) -> String {
    format!("{}{TAG_SEPARATOR}{candle_id}", event.as_str())
}

/// Parse a callback tag back into the action and candle id.
///
/// Only `approve` and `delete` are valid button actions.
pub fn parse_callback_tag(tag: &str) -> Result<(ModerationEvent, DbId), String> {
    let (action, id) = tag
        .split_once(TAG_SEPARATOR)
        .ok_or_else(|| format!("Malformed callback tag '{tag}'"))?;

    let event = match action {
        "approve" => ModerationEvent::Approve,
        "delete" => ModerationEvent::Delete,
        other => return Err(format!("Unknown callback action '{other}'")),
    };

    let candle_id = id
        .parse::<DbId>()
        .map_err(|_| format!("Invalid candle id '{id}' in callback tag"))?;

    Ok((event, candle_id))
}

/// Format a timestamp for moderators in the configured display offset.
pub fn format_display_date(ts: Timestamp, offset: FixedOffset) -> String {
    ts.with_timezone(&offset).format(DATE_FORMAT).to_string()
}

/// Compose the body of a moderation prompt.
pub fn compose_prompt(view: &PromptView<'_>, framing: PromptFraming, offset: FixedOffset) -> String {
    format!(
        "{header}\n\n\
         Name: {name}\n\
         Text: {text}\n\
         Date: {date}\n\
         Status: {status}\n\
         ID: {id}",
        header = framing.header(),
        name = view.writer_name,
        text = view.text,
        date = format_display_date(view.created_at, offset),
        status = view.status,
        id = view.id,
    )
}

/// Compose the prompt body with the moderation result appended.
///
/// The body is rebuilt rather than edited, so resolving twice replaces the
/// result line instead of stacking a second one.
pub fn compose_resolved(
    view: &PromptView<'_>,
    framing: PromptFraming,
    offset: FixedOffset,
    result: &str,
) -> String {
    format!("{}\n\nResult: {result}", compose_prompt(view, framing, offset))
}
