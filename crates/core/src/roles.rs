//! Well-known role name constants.

/// The only role that may moderate content or manage forbidden words.
pub const ROLE_ADMIN: &str = "admin";
