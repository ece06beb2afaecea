//! Commemorative event (ceremony, memorial evening) rules.

/// Smallest group a single registration may cover.
pub const MIN_PARTICIPANTS: i32 = 1;

/// Largest group a single registration may cover.
pub const MAX_PARTICIPANTS: i32 = 10;

/// Maximum length of a commemoration title.
pub const MAX_TITLE_CHARS: usize = 200;

/// Validate the fields of a new commemoration.
pub fn validate_commemoration(title: &str, capacity: Option<i32>) -> Result<(), String> {
    let title = title.trim();
    if title.is_empty() {
        return Err("title is required".to_string());
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(format!("title must be at most {MAX_TITLE_CHARS} characters"));
    }
    if let Some(cap) = capacity {
        if cap < 1 {
            return Err("capacity must be positive when set".to_string());
        }
    }
    Ok(())
}

/// Validate the fields of a registration (email is checked separately).
pub fn validate_registration(full_name: &str, participants: i32) -> Result<(), String> {
    if full_name.trim().is_empty() {
        return Err("fullName is required".to_string());
    }
    if !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&participants) {
        return Err(format!(
            "participants must be between {MIN_PARTICIPANTS} and {MAX_PARTICIPANTS}"
        ));
    }
    Ok(())
}

/// Check that a registration of `requested` seats still fits.
///
/// `capacity = None` means unlimited.
pub fn check_capacity(capacity: Option<i32>, registered: i64, requested: i32) -> Result<(), String> {
    match capacity {
        Some(cap) if registered + i64::from(requested) > i64::from(cap) => Err(format!(
            "Only {} places left",
            (i64::from(cap) - registered).max(0)
        )),
        _ => Ok(()),
    }
}
