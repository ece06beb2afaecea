//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod candle_repo;
pub mod commemoration_repo;
pub mod forbidden_word_repo;
pub mod subscriber_repo;

pub use activity_repo::ActivityRepo;
pub use candle_repo::CandleRepo;
pub use commemoration_repo::{CommemorationRepo, RegistrationOutcome, RegistrationRepo};
pub use forbidden_word_repo::ForbiddenWordRepo;
pub use subscriber_repo::SubscriberRepo;
