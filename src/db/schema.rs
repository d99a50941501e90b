//! Database schema and migrations for Gatehouse.
//!
//! Migrations are applied sequentially when the database is first opened or
//! upgraded; the `schema_version` table records which ones ran.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users table
    r#"
CREATE TABLE users (
    id          TEXT PRIMARY KEY,        -- UUID v4
    username    TEXT NOT NULL UNIQUE,
    email       TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,           -- bcrypt hash
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
];
