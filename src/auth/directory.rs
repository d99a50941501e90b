//! User directory interface.
//!
//! The authentication flow only talks to user storage through this trait,
//! so the SQLite repository can be swapped for any other backend.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::db::{NewUser, PublicUser, User};

/// Column whose uniqueness constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::Username => write!(f, "username"),
            UniqueField::Email => write!(f, "email"),
        }
    }
}

/// Errors reported by a user directory.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// A record with the same username or email already exists.
    #[error("duplicate {0}")]
    Duplicate(UniqueField),

    /// The underlying store failed.
    #[error("database error: {0}")]
    Database(String),
}

/// Persistent store of user identity records.
///
/// Implementations must enforce username/email uniqueness themselves and
/// report a violation as [`DirectoryError::Duplicate`].
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DirectoryError>;

    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError>;

    /// Find a user by ID. The password hash is never loaded.
    async fn find_by_id(&self, id: &str) -> Result<Option<PublicUser>, DirectoryError>;

    /// Create a user and return the stored record.
    async fn create(&self, new_user: &NewUser) -> Result<User, DirectoryError>;
}
