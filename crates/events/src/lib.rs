//! Activity bus and outbound delivery for the memorial site.
//!
//! - [`EventBus`]: in-process publish/subscribe hub for [`ActivityEvent`]s.
//! - [`ActivityPersistence`]: background task writing every event to
//!   `activity_log`.
//! - [`delivery`]: Telegram Bot API client and SMTP email.
//! - [`notifier`]: moderation prompts in the moderators' chat.

pub mod bus;
pub mod delivery;
pub mod notifier;
pub mod persistence;

pub use bus::{ActivityEvent, EventBus};
pub use delivery::email::{EmailConfig, EmailDelivery, Mailer};
pub use delivery::telegram::{TelegramClient, TelegramConfig};
pub use notifier::{DisabledNotifier, ModerationNotifier, TelegramNotifier};
pub use persistence::ActivityPersistence;
