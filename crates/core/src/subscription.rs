//! Email subscription helpers.

use validator::ValidateEmail;

/// Maximum stored length of an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

/// Normalise and validate a subscriber or registrant email address.
///
/// Addresses are trimmed and lowercased so the same mailbox cannot be
/// subscribed twice with different casing.
pub fn normalize_email(raw: &str) -> Result<String, String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err("email is required".to_string());
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(format!("email must be at most {MAX_EMAIL_LEN} characters"));
    }
    if !email.validate_email() {
        return Err(format!("'{email}' is not a valid email address"));
    }
    Ok(email)
}
