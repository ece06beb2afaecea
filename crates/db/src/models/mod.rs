//! Row models and create DTOs.
//!
//! Entity structs derive `FromRow` + `Serialize` and serialize in camelCase,
//! which is the wire format of the public API.

pub mod activity;
pub mod candle;
pub mod commemoration;
pub mod forbidden_word;
pub mod subscriber;
