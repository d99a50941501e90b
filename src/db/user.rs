//! User model for Gatehouse.

use serde::Serialize;

/// User entity as stored in the directory.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4, assigned at creation).
    pub id: String,
    /// Login username (unique).
    pub username: String,
    /// Email address (unique).
    pub email: String,
    /// Password hash (bcrypt).
    pub password: String,
    /// Account creation timestamp.
    pub created_at: String,
}

impl User {
    /// Project out the password hash.
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username,
            email: self.email,
            created_at: self.created_at,
        }
    }
}

/// A user record without its password hash.
///
/// This is the only user shape that is ever serialized to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PublicUser {
    /// Unique user ID.
    pub id: String,
    /// Login username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Account creation timestamp.
    pub created_at: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        user.into_public()
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Password hash (must already be hashed).
    pub password: String,
}

impl NewUser {
    /// Create a new user record.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password_hash.into(),
        }
    }
}
