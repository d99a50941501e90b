//! Database module for Gatehouse.
//!
//! This module provides SQLite connectivity (via sqlx) and migration management.

mod repository;
mod schema;
mod user;

pub use repository::UserRepository;
pub use schema::MIGRATIONS;
pub use user::{NewUser, PublicUser, User};

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::Result;

/// Create the directory holding a file-backed SQLite database.
fn ensure_parent_dir(url: &str) -> Result<()> {
    let path = url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }

    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Database wrapper owning the SQLite connection pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a database at the given SQLite URL.
    ///
    /// The file is created if it doesn't exist. Migrations are applied.
    pub async fn open(url: &str) -> Result<Self> {
        info!("Opening database at {}", url);
        ensure_parent_dir(url)?;

        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Open an in-memory database for testing.
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to one connection that is never recycled.
    pub async fn open_in_memory() -> Result<Self> {
        debug!("Opening in-memory database");

        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the current schema version.
    pub async fn schema_version(&self) -> Result<i64> {
        if !self.table_exists("schema_version").await? {
            return Ok(0);
        }

        let version: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(version), 0) FROM schema_version")
                .fetch_one(&self.pool)
                .await?;

        Ok(version)
    }

    /// Apply pending migrations.
    pub async fn migrate(&self) -> Result<()> {
        let current_version = self.schema_version().await?;

        if current_version as usize >= MIGRATIONS.len() {
            debug!("Database is up to date (version {})", current_version);
            return Ok(());
        }

        info!(
            "Migrating database from version {} to {}",
            current_version,
            MIGRATIONS.len()
        );

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version     INTEGER PRIMARY KEY,
                applied_at  TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        )
        .execute(&self.pool)
        .await?;

        for (i, migration) in MIGRATIONS.iter().enumerate().skip(current_version as usize) {
            let version = (i + 1) as i64;
            info!("Applying migration v{}", version);

            let mut tx = self.pool.begin().await?;

            sqlx::raw_sql(migration).execute(&mut *tx).await?;

            sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
                .bind(version)
                .execute(&mut *tx)
                .await?;

            tx.commit().await?;
            debug!("Migration v{} applied successfully", version);
        }

        info!(
            "Database migration complete (now at version {})",
            MIGRATIONS.len()
        );
        Ok(())
    }

    /// Check if a table exists.
    pub async fn table_exists(&self, table_name: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?)",
        )
        .bind(table_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory() {
        let db = Database::open_in_memory().await.unwrap();
        assert!(db.schema_version().await.unwrap() > 0);
    }

    #[tokio::test]
    async fn test_migrations_applied() {
        let db = Database::open_in_memory().await.unwrap();

        let version = db.schema_version().await.unwrap();
        assert_eq!(version as usize, MIGRATIONS.len());
    }

    #[tokio::test]
    async fn test_users_table_exists() {
        let db = Database::open_in_memory().await.unwrap();

        assert!(db.table_exists("users").await.unwrap());
        assert!(db.table_exists("schema_version").await.unwrap());
        assert!(!db.table_exists("sessions").await.unwrap());
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let db = Database::open_in_memory().await.unwrap();

        db.migrate().await.unwrap();
        assert_eq!(db.schema_version().await.unwrap() as usize, MIGRATIONS.len());
    }

    #[tokio::test]
    async fn test_open_file_database() {
        let temp_dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        {
            let db = Database::open(&url).await.unwrap();
            assert!(db.table_exists("users").await.unwrap());
            db.pool().close().await;
        }

        // Reopen: migrations are not reapplied
        {
            let db = Database::open(&url).await.unwrap();
            assert_eq!(db.schema_version().await.unwrap() as usize, MIGRATIONS.len());
            db.pool().close().await;
        }
    }

    #[tokio::test]
    async fn test_open_creates_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.db");
        let url = format!("sqlite://{}", path.display());

        let db = Database::open(&url).await.unwrap();
        db.pool().close().await;

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_username_and_email_are_unique() {
        let db = Database::open_in_memory().await.unwrap();

        sqlx::query("INSERT INTO users (id, username, email, password) VALUES (?, ?, ?, ?)")
            .bind("a")
            .bind("alice")
            .bind("alice@x.com")
            .bind("hash")
            .execute(db.pool())
            .await
            .unwrap();

        let dup_username =
            sqlx::query("INSERT INTO users (id, username, email, password) VALUES (?, ?, ?, ?)")
                .bind("b")
                .bind("alice")
                .bind("other@x.com")
                .bind("hash")
                .execute(db.pool())
                .await;
        assert!(dup_username.is_err());

        let dup_email =
            sqlx::query("INSERT INTO users (id, username, email, password) VALUES (?, ?, ?, ?)")
                .bind("c")
                .bind("bob")
                .bind("alice@x.com")
                .bind("hash")
                .execute(db.pool())
                .await;
        assert!(dup_email.is_err());
    }
}
