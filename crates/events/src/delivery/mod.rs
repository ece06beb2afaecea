//! External delivery channels: the moderators' Telegram chat and SMTP email.

pub mod email;
pub mod telegram;
