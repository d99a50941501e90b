//! Authentication module for Gatehouse.
//!
//! This module provides password hashing, session token handling,
//! the user directory seam and the signup/login/session flow built on them.

mod directory;
mod flow;
mod password;
mod token;

pub use directory::{DirectoryError, UniqueField, UserDirectory};
pub use flow::{AuthError, AuthService, Session, MSG_LOGIN_OK, MSG_LOGOUT_OK, MSG_SIGNUP_OK};
pub use password::{CredentialHasher, PasswordError, DEFAULT_COST};
pub use token::{
    InvalidReason, InvalidToken, IssueError, SessionClaims, SessionTokenCodec,
    DEFAULT_TOKEN_TTL_DAYS,
};
