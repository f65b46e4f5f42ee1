// Bookstore Core - Inventory data layer for the bookstore app
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! # bookstore-core
//!
//! The data-access core of the bookstore inventory app: a SQLite-backed
//! store of book records (name, price, quantity, supplier) addressed through
//! content URIs, with field-presence validation and a change-notification
//! bus for observers.
//!
//! The UI layer is an external caller: it invokes [`BookProvider`]'s
//! `query` / `insert` / `update` / `delete` / `get_type`, subscribes to
//! change events, and re-queries when one arrives.
//!
//! ```no_run
//! use bookstore_core::{BookProvider, BookValues, StoreConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = BookProvider::open(&StoreConfig::default()).await?;
//! let mut changes = provider.subscribe();
//!
//! let values = BookValues::new()
//!     .product_name("Dune")
//!     .price(9.99)
//!     .quantity(3);
//! let item = provider
//!     .insert(provider.collection_uri().as_str(), &values)
//!     .await?
//!     .expect("row saved");
//!
//! // The insert published a change for the collection address
//! assert_eq!(changes.recv().await?.address, provider.collection_uri());
//!
//! let rows = provider.query(item.as_str(), None, None, None).await?;
//! assert_eq!(rows[0].quantity, Some(3));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod contract;
pub mod error;
pub mod notify;
pub mod provider;
pub mod router;
pub mod storage;

pub use config::StoreConfig;
pub use contract::Column;
pub use error::{Result, StoreError};
pub use notify::{ChangeEvent, ChangeNotifier};
pub use provider::BookProvider;
pub use router::{Route, Router};
pub use storage::{Book, BookValues, Database, Filter, FilterArg, SortOrder};
