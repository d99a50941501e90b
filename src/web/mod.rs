//! Web API module for Gatehouse.
//!
//! JSON endpoints for signup, login, session lookup and logout, with the
//! session token carried in an HttpOnly cookie.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::{build_app_state, WebServer};
