//! Forbidden-word filter for candle submissions.
//!
//! Matching is case-insensitive and whole-word. Word boundaries are found by
//! character class rather than an ASCII `\b`, so Hebrew letters (and their
//! vowel points) count as word characters while whitespace, punctuation,
//! maqaf and quote marks separate words.

use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// Which field of a submission a forbidden word was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmissionField {
    WriterName,
    Text,
}

impl SubmissionField {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionField::WriterName => "writerName",
            SubmissionField::Text => "text",
        }
    }
}

impl fmt::Display for SubmissionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hebrew cantillation marks and vowel points. These are combining marks
/// that sit inside a word, unlike maqaf (U+05BE) or sof pasuq (U+05C3).
fn is_hebrew_mark(c: char) -> bool {
    matches!(
        c,
        '\u{0591}'..='\u{05BD}'
            | '\u{05BF}'
            | '\u{05C1}'
            | '\u{05C2}'
            | '\u{05C4}'
            | '\u{05C5}'
            | '\u{05C7}'
    )
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || is_hebrew_mark(c)
}

/// Split text into lowercase word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !is_word_char(c))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Normalise a forbidden word for storage: trimmed and lowercased.
///
/// Returns `None` when nothing usable remains.
pub fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim().to_lowercase();
    if word.is_empty() || tokenize(&word).is_empty() {
        None
    } else {
        Some(word)
    }
}

/// Find the first forbidden word that occurs in `text` as a whole word.
///
/// `words` is scanned in order, so the result is the earliest-loaded match.
/// A multi-word entry matches when its tokens appear consecutively.
/// Punctuation inside an entry separates tokens like whitespace does, so
/// `a-hole` also matches "a hole" and "a.hole".
pub fn find_forbidden_word<'w, S: AsRef<str>>(text: &str, words: &'w [S]) -> Option<&'w str> {
    let text_tokens = tokenize(text);
    if text_tokens.is_empty() {
        return None;
    }

    words.iter().map(|w| w.as_ref()).find(|word| {
        let needle = tokenize(word);
        !needle.is_empty()
            && needle.len() <= text_tokens.len()
            && text_tokens
                .windows(needle.len())
                .any(|window| window == needle.as_slice())
    })
}

/// Check both user-supplied fields of a submission.
///
/// The author name is checked before the dedication text; the first hit
/// blocks the whole submission.
pub fn check_submission<S: AsRef<str>>(
    writer_name: &str,
    text: &str,
    words: &[S],
) -> Result<(), CoreError> {
    let fields = [
        (SubmissionField::WriterName, writer_name),
        (SubmissionField::Text, text),
    ];
    for (field, value) in fields {
        if let Some(word) = find_forbidden_word(value, words) {
            return Err(CoreError::Blocked {
                word: word.to_string(),
                field,
            });
        }
    }
    Ok(())
}
