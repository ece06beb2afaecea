//! Outcome type for advisory side effects (chat prompts, emails).
//!
//! A moderation decision is durable once the store accepts it. Anything that
//! happens afterwards is best-effort: it reports what happened through
//! [`BestEffort`] instead of an `Err`, and callers are free to ignore it.
//! Ignoring is spelled out at the call site (`.ignore()`), so a discarded
//! failure is visible in review.

/// Result of a best-effort side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestEffort<T> {
    /// The side effect happened.
    Done(T),
    /// The channel is not configured; nothing was attempted.
    Skipped,
    /// The attempt failed. The failure has already been logged.
    Failed(String),
}

impl<T> BestEffort<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, BestEffort::Done(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, BestEffort::Failed(_))
    }

    /// The produced value, if any.
    pub fn done(self) -> Option<T> {
        match self {
            BestEffort::Done(value) => Some(value),
            BestEffort::Skipped | BestEffort::Failed(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> BestEffort<U> {
        match self {
            BestEffort::Done(value) => BestEffort::Done(f(value)),
            BestEffort::Skipped => BestEffort::Skipped,
            BestEffort::Failed(reason) => BestEffort::Failed(reason),
        }
    }

    /// Explicitly discard the outcome.
    pub fn ignore(self) {}
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for BestEffort<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => BestEffort::Done(value),
            Err(e) => BestEffort::Failed(e.to_string()),
        }
    }
}
