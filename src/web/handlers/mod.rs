//! API handlers for Gatehouse.

pub mod auth;

pub use auth::*;

/// GET / - Liveness probe.
pub async fn root() -> &'static str {
    "Server is up and running!"
}
