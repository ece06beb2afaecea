//! Domain logic for the memorial site backend.
//!
//! Everything here is free of I/O so it can be shared by the repository
//! layer, the event/delivery layer and the HTTP handlers.

pub mod activity;
pub mod candle;
pub mod commemoration;
pub mod error;
pub mod moderation;
pub mod prompt;
pub mod roles;
pub mod side_effect;
pub mod subscription;
pub mod types;
pub mod word_filter;
