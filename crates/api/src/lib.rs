//! Memorial site API server library.
//!
//! Exposes config, state, error handling, the moderation workflow and the
//! router so that integration tests and the binary share one setup.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod moderation;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
