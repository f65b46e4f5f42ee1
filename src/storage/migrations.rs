// Bookstore Core - Inventory data layer for the bookstore app
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Database migrations
//!
//! Schema creation for the books table. Migrations run as plain SQL at
//! startup (no build-time database connection required) and are tracked in
//! the `_migrations` table so each one applies exactly once.
//!
//! The schema is at version 1. There is no upgrade path yet; when a schema
//! change lands, it becomes migration 2 and applies on top of existing
//! databases through the same tracking table.

use sqlx::{Executor, SqlitePool};
use tracing::info;

use crate::error::Result;

/// Run all database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    create_migrations_table(pool).await?;

    run_migration(pool, 1, "initial_schema", create_initial_schema(pool)).await?;

    Ok(())
}

/// Create migrations tracking table
async fn create_migrations_table(pool: &SqlitePool) -> Result<()> {
    pool.execute(
        r#"
        CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .await?;

    Ok(())
}

/// Run a single migration if it hasn't been applied yet
async fn run_migration(
    pool: &SqlitePool,
    id: i32,
    name: &str,
    migration_fn: impl std::future::Future<Output = Result<()>>,
) -> Result<()> {
    let applied: Option<i32> = sqlx::query_scalar("SELECT id FROM _migrations WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    if applied.is_some() {
        return Ok(());
    }

    migration_fn.await?;

    sqlx::query("INSERT INTO _migrations (id, name) VALUES (?, ?)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await?;

    info!(id, name, "migration applied");
    Ok(())
}

/// Create the initial books schema.
///
/// `id` auto-increments so removed ids are never reassigned; the three
/// required columns are NOT NULL, the supplier columns are nullable.
async fn create_initial_schema(pool: &SqlitePool) -> Result<()> {
    pool.execute(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_name TEXT NOT NULL,
            price REAL NOT NULL,
            quantity INTEGER NOT NULL,
            supplier_name TEXT,
            supplier_phone_number TEXT
        )
        "#,
    )
    .await?;

    Ok(())
}
