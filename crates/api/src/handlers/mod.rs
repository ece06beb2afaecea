pub mod activity;
pub mod admin;
pub mod candles;
pub mod commemorations;
pub mod forbidden_words;
pub mod subscribers;
pub mod telegram;
