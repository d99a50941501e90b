//! User repository for Gatehouse.
//!
//! SQLite implementation of [`UserDirectory`].

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use super::user::{NewUser, PublicUser, User};
use crate::auth::{DirectoryError, UniqueField, UserDirectory};

/// Repository for user records.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new UserRepository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Count all users.
    #[cfg(test)]
    pub async fn count(&self) -> Result<i64, DirectoryError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DirectoryError::Database(e.to_string()))
    }
}

/// Map an insert failure onto the directory error space.
///
/// SQLite reports the violated column as `UNIQUE constraint failed: users.<col>`.
fn map_insert_error(err: sqlx::Error) -> DirectoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let message = db_err.message();
            if message.contains("users.email") {
                return DirectoryError::Duplicate(UniqueField::Email);
            }
            if message.contains("users.username") {
                return DirectoryError::Duplicate(UniqueField::Username);
            }
        }
    }
    DirectoryError::Database(err.to_string())
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DirectoryError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DirectoryError::Database(e.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DirectoryError::Database(e.to_string()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<PublicUser>, DirectoryError> {
        sqlx::query_as::<_, PublicUser>(
            "SELECT id, username, email, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DirectoryError::Database(e.to_string()))
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DirectoryError> {
        let id = uuid::Uuid::new_v4().to_string();

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, email, password)
             VALUES (?, ?, ?, ?)
             RETURNING id, username, email, password, created_at",
        )
        .bind(&id)
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        debug!(user_id = %user.id, "User record created");
        Ok(user)
    }
}
