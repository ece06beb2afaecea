//! Admin authentication.
//!
//! - [`password`]: Argon2id verification of the shared admin password.
//! - [`jwt`]: HS256 access tokens carrying the `admin` role.

pub mod jwt;
pub mod password;
