//! Authentication extractors.
//!
//! - [`auth::AuthUser`]: claims from a JWT Bearer token.
//! - [`rbac::RequireAdmin`]: requires the `admin` role.

pub mod auth;
pub mod rbac;
