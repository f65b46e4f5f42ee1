// Bookstore Core - Inventory data layer for the bookstore app
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Database connection and management
//!
//! Handles connection pooling, initialization, and schema setup for the
//! SQLite store beneath the provider.
//!
//! # SQLite Configuration
//! - WAL mode: readers run concurrently while the engine serializes writes
//! - Foreign keys enabled
//! - Normal synchronous mode (balance safety/speed)
//! - Busy timeout so no writer blocks indefinitely

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use tracing::info;

use crate::error::{Result, StoreError};

/// Database manager - owns the connection pool for one store instance
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    path: Option<PathBuf>, // None for in-memory databases
}

impl Database {
    /// Open (or create) a database file and bring the schema up to date.
    ///
    /// # Errors
    /// Returns error if:
    /// - Parent directory doesn't exist and can't be created
    /// - Database file can't be opened
    /// - Migrations fail
    pub async fn new<P: AsRef<Path>>(database_path: P) -> Result<Self> {
        let path = database_path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::FileIoError(format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let connection_string = format!("sqlite://{}?mode=rwc", path.display());
        let connect_opts = SqliteConnectOptions::from_str(&connection_string)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .foreign_keys(true)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(30))
            .disable_statement_logging();

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(connect_opts)
            .await?;

        let db = Self {
            pool,
            path: Some(path.to_path_buf()),
        };
        db.migrate().await?;

        info!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Create in-memory database for testing
    pub async fn new_in_memory() -> Result<Self> {
        let connect_opts = SqliteConnectOptions::from_str("sqlite::memory:")?
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .foreign_keys(true)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .disable_statement_logging();

        let pool = SqlitePoolOptions::new()
            .max_connections(1) // In-memory DB is per-connection
            .connect_with(connect_opts)
            .await?;

        let db = Self { pool, path: None };
        db.migrate().await?;

        Ok(db)
    }

    /// Run database migrations.
    ///
    /// Applied automatically when opening; harmless to call again.
    pub async fn migrate(&self) -> Result<()> {
        crate::storage::migrations::run_migrations(&self.pool)
            .await
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;

        Ok(())
    }

    /// Get reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get database file path
    ///
    /// Returns `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close database and release all connections.
    ///
    /// Waits for active connections to finish before closing.
    pub async fn close(self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new_in_memory()
            .await
            .expect("Failed to create in-memory database");

        let result: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(db.pool())
            .await
            .expect("Failed to query database");

        assert_eq!(result, 1);
    }

    #[tokio::test]
    async fn test_file_backed_database() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("books.db");

        let db = Database::new(&path).await.expect("Failed to create database");
        assert_eq!(db.path(), Some(path.as_path()));
        assert!(path.exists());

        db.close().await.expect("Failed to close database");
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let db = Database::new_in_memory()
            .await
            .expect("Failed to create database");

        let fk_enabled: i32 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(db.pool())
            .await
            .expect("Failed to check foreign keys");

        assert_eq!(fk_enabled, 1, "Foreign keys not enabled");
    }
}
