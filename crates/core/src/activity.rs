//! Activity log action names.
//!
//! The activity log is append-only and written out of band; nothing reads it
//! back to make decisions. These strings are what ends up in
//! `activity_log.action`.

/// Known action types for activity log entries.
pub mod actions {
    pub const CANDLE_SUBMITTED: &str = "candle.submitted";
    pub const CANDLE_BLOCKED: &str = "candle.blocked";
    pub const CANDLE_APPROVED: &str = "candle.approved";
    pub const CANDLE_DELETED: &str = "candle.deleted";
    pub const CANDLE_REPORTED: &str = "candle.reported";
    pub const FORBIDDEN_WORDS_ADDED: &str = "forbidden_words.added";
    pub const FORBIDDEN_WORD_DELETED: &str = "forbidden_word.deleted";
    pub const ADMIN_LOGIN: &str = "admin.login";
    pub const SUBSCRIBER_ADDED: &str = "subscriber.added";
    pub const COMMEMORATION_CREATED: &str = "commemoration.created";
}

/// Known actor names.
pub mod actors {
    pub const VISITOR: &str = "visitor";
    pub const ADMIN: &str = "admin";
    pub const CHAT_MODERATOR: &str = "chat_moderator";
}

/// Activity action recorded for a completed moderation effect.
pub fn action_for_effect(effect: crate::moderation::Effect) -> &'static str {
    use crate::moderation::Effect;
    match effect {
        Effect::Approve => actions::CANDLE_APPROVED,
        Effect::Delete => actions::CANDLE_DELETED,
        Effect::Report => actions::CANDLE_REPORTED,
    }
}

/// Actor recorded for a moderation decision from `source`.
pub fn actor_for_source(source: crate::moderation::ModerationSource) -> &'static str {
    use crate::moderation::ModerationSource;
    match source {
        ModerationSource::AdminPanel => actors::ADMIN,
        ModerationSource::ChatCallback => actors::CHAT_MODERATOR,
        ModerationSource::Viewer => actors::VISITOR,
    }
}
