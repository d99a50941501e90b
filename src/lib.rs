//! Gatehouse - cookie session authentication service
//!
//! User signup and login over a JSON API, with bcrypt password hashing and
//! stateless JWT sessions carried in an HttpOnly cookie.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    AuthError, AuthService, CredentialHasher, DirectoryError, InvalidReason, InvalidToken,
    PasswordError, Session, SessionClaims, SessionTokenCodec, UniqueField, UserDirectory,
};
pub use config::{Config, Environment};
pub use db::{Database, NewUser, PublicUser, User, UserRepository};
pub use error::{GatehouseError, Result};
pub use web::{create_router, AppState, WebServer};
