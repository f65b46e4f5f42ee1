// Bookstore Core - Inventory data layer for the bookstore app
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! SQLite storage for the books table
//!
//! Connection management, schema migrations, row models, and the SQL
//! execution functions the provider drives. Nothing in here validates or
//! routes; that is the provider's job.
//!
//! # Usage Example
//! ```no_run
//! use bookstore_core::storage::{queries, Database};
//! use bookstore_core::BookValues;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("./books.db").await?;
//!
//! let values = BookValues::new()
//!     .product_name("Dune")
//!     .price(9.99)
//!     .quantity(3);
//! let id = queries::insert_book(db.pool(), &values).await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

// Re-export commonly used types
pub use database::Database;
pub use models::{Book, BookValues};
pub use queries::{Filter, FilterArg, SortOrder};
