use std::sync::Arc;

use memorial_db::store::{CandleStore, ForbiddenWordStore};
use memorial_db::DbPool;
use memorial_events::{EventBus, Mailer, ModerationNotifier};

use crate::config::ServerConfig;
use crate::moderation::Moderation;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind an `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Pool for the repositories outside the moderation seam.
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    pub candles: Arc<dyn CandleStore>,
    pub forbidden_words: Arc<dyn ForbiddenWordStore>,
    pub notifier: Arc<dyn ModerationNotifier>,
    /// `None` when SMTP is not configured.
    pub mailer: Option<Arc<dyn Mailer>>,
    pub event_bus: Arc<EventBus>,
    /// Expected `X-Telegram-Bot-Api-Secret-Token`, if configured.
    pub webhook_secret: Option<Arc<str>>,
}

impl AppState {
    /// The moderation workflow over this state's stores and notifier.
    pub fn moderation(&self) -> Moderation<'_> {
        Moderation::new(
            self.candles.as_ref(),
            self.forbidden_words.as_ref(),
            self.notifier.as_ref(),
            &self.event_bus,
        )
    }
}
