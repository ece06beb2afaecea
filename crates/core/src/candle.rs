//! Candle status values and submission validation.
//!
//! The status strings are persisted verbatim in the `candles.status` column
//! and returned to API callers, so they must not change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Maximum length of a dedication, in Unicode scalar values.
pub const MAX_TEXT_CHARS: usize = 256;

/// Maximum length of the author name, in Unicode scalar values.
pub const MAX_WRITER_NAME_CHARS: usize = 100;

/// Lifecycle status of a stored candle.
///
/// Deletion is not a status: a deleted candle has no row at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandleStatus {
    Pending,
    Approved,
    Reported,
}

impl CandleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CandleStatus::Pending => "Pending",
            CandleStatus::Approved => "Approved",
            CandleStatus::Reported => "Reported",
        }
    }

    /// Only approved candles are shown on the public listing.
    pub fn is_public(self) -> bool {
        self == CandleStatus::Approved
    }
}

impl fmt::Display for CandleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandleStatus {
    type Err = String;

    /// Accepts the persisted spelling as well as lowercase query values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" | "pending" => Ok(CandleStatus::Pending),
            "Approved" | "approved" => Ok(CandleStatus::Approved),
            "Reported" | "reported" => Ok(CandleStatus::Reported),
            other => Err(format!(
                "Invalid candle status '{other}'. Must be one of: Pending, Approved, Reported"
            )),
        }
    }
}

impl TryFrom<String> for CandleStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Validate the free-text fields of a submission.
///
/// Both fields are trimmed before checking; lengths are counted in chars,
/// not bytes, so Hebrew text gets the same budget as Latin text.
pub fn validate_candle_fields(writer_name: &str, text: &str) -> Result<(), String> {
    let writer_name = writer_name.trim();
    let text = text.trim();

    if writer_name.is_empty() {
        return Err("writerName is required".to_string());
    }
    if text.is_empty() {
        return Err("text is required".to_string());
    }
    if writer_name.chars().count() > MAX_WRITER_NAME_CHARS {
        return Err(format!(
            "writerName must be at most {MAX_WRITER_NAME_CHARS} characters"
        ));
    }
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(format!("text must be at most {MAX_TEXT_CHARS} characters"));
    }
    Ok(())
}

/// Parse the client-supplied creation time (RFC 3339).
pub fn parse_created_at(raw: &str) -> Result<Timestamp, String> {
    chrono::DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|_| format!("createdAt '{raw}' is not a valid RFC 3339 timestamp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_persisted_string() {
        for status in [
            CandleStatus::Pending,
            CandleStatus::Approved,
            CandleStatus::Reported,
        ] {
            assert_eq!(status.as_str().parse::<CandleStatus>().unwrap(), status);
        }
    }

    #[test]
    fn lowercase_status_is_accepted() {
        assert_eq!("reported".parse::<CandleStatus>().unwrap(), CandleStatus::Reported);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "Deleted".parse::<CandleStatus>().unwrap_err();
        assert!(err.contains("Invalid candle status"));
    }

    #[test]
    fn only_approved_is_public() {
        assert!(CandleStatus::Approved.is_public());
        assert!(!CandleStatus::Pending.is_public());
        assert!(!CandleStatus::Reported.is_public());
    }

    #[test]
    fn valid_fields_pass() {
        assert!(validate_candle_fields("דנה", "תודה על הכל").is_ok());
    }

    #[test]
    fn blank_fields_fail() {
        assert!(validate_candle_fields("   ", "text").is_err());
        assert!(validate_candle_fields("name", "\n").is_err());
    }

    #[test]
    fn text_limit_counts_chars_not_bytes() {
        // 256 Hebrew letters are 512 bytes but still within the limit.
        let text = "א".repeat(MAX_TEXT_CHARS);
        assert!(validate_candle_fields("name", &text).is_ok());

        let too_long = "א".repeat(MAX_TEXT_CHARS + 1);
        let err = validate_candle_fields("name", &too_long).unwrap_err();
        assert!(err.contains("at most 256"));
    }

    #[test]
    fn writer_name_limit_enforced() {
        let name = "x".repeat(MAX_WRITER_NAME_CHARS + 1);
        assert!(validate_candle_fields(&name, "text").is_err());
    }

    #[test]
    fn parses_rfc3339_created_at() {
        let ts = parse_created_at("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn created_at_with_offset_is_normalised_to_utc() {
        let ts = parse_created_at("2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn garbage_created_at_is_rejected() {
        assert!(parse_created_at("yesterday").is_err());
    }
}
