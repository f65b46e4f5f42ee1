// Bookstore Core - Inventory data layer for the bookstore app
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! The book provider: routing, validation, CRUD, change notification
//!
//! `BookProvider` is the single entry point the app layer talks to. Every
//! operation takes a content address, resolves it against the provider's
//! routing table, validates whatever fields the caller supplied, executes the
//! SQL, and publishes a change event when rows actually changed.
//!
//! Callers own their async dispatch; the provider performs no coordination
//! beyond what the SQLite pool provides (readers run concurrently, the engine
//! serializes writes).

use tokio::sync::broadcast;
use tracing::debug;
use url::Url;

use crate::config::StoreConfig;
use crate::contract::{content_item_type, content_list_type, item_uri, Column};
use crate::error::{Result, StoreError};
use crate::notify::{ChangeEvent, ChangeNotifier};
use crate::router::{Route, Router};
use crate::storage::models::{Book, BookValues};
use crate::storage::queries::{self, Filter, SortOrder};
use crate::storage::Database;

/// SQLite-backed book store with URI addressing and change notifications
#[derive(Debug, Clone)]
pub struct BookProvider {
    db: Database,
    router: Router,
    notifier: ChangeNotifier,
}

impl BookProvider {
    /// Wrap an open database with routing for the given authority
    pub fn new(db: Database, authority: impl Into<String>) -> Result<Self> {
        Ok(Self {
            db,
            router: Router::new(authority)?,
            notifier: ChangeNotifier::new(),
        })
    }

    /// Open (or create) the store described by the configuration
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let db = Database::new(config.resolve_database_path()).await?;
        Self::new(db, config.authority.clone())
    }

    /// In-memory store with the default authority, for tests and previews
    pub async fn in_memory() -> Result<Self> {
        let db = Database::new_in_memory().await?;
        Self::new(db, crate::contract::DEFAULT_AUTHORITY)
    }

    /// The authority this provider answers for
    pub fn authority(&self) -> &str {
        self.router.authority()
    }

    /// The collection address of this store
    pub fn collection_uri(&self) -> Url {
        self.router.collection_uri()
    }

    /// The item address for a book id
    pub fn item_uri(&self, id: i64) -> Url {
        item_uri(self.router.authority(), id)
    }

    /// Subscribe to change events. Subscribers re-query on event; the event
    /// carries only the affected address.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.notifier.subscribe()
    }

    /// The underlying database (typed lookups, maintenance)
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Report the type tag for an address: "list of books" for the
    /// collection, "single book" for an item.
    pub fn get_type(&self, address: &str) -> Result<String> {
        match self.router.resolve(address) {
            Some(Route::Collection) => Ok(content_list_type(self.router.authority())),
            Some(Route::Item(_)) => Ok(content_item_type(self.router.authority())),
            None => Err(StoreError::invalid_address(address)),
        }
    }

    /// Query rows at an address.
    ///
    /// An item address qualifies the query to that single id, replacing any
    /// caller-supplied filter. An empty or absent projection selects all
    /// columns; natural order applies when no order is given.
    pub async fn query(
        &self,
        address: &str,
        projection: Option<&[Column]>,
        filter: Option<&Filter>,
        order: Option<SortOrder>,
    ) -> Result<Vec<BookValues>> {
        match self.parse(address) {
            Some((_, Route::Collection)) => {
                queries::query_books(self.db.pool(), projection, filter, order).await
            }
            Some((_, Route::Item(id))) => {
                let id_filter = Filter::by_id(id);
                queries::query_books(self.db.pool(), projection, Some(&id_filter), order).await
            }
            None => Err(StoreError::invalid_address(address)),
        }
    }

    /// Insert a book at the collection address.
    ///
    /// Validates before any write: the three required fields must be present
    /// and pass their rules. On success, notifies the collection address and
    /// returns the new item's address. `Ok(None)` means the storage engine
    /// rejected the row; nothing was saved and no event was published.
    pub async fn insert(&self, address: &str, values: &BookValues) -> Result<Option<Url>> {
        let url = match self.parse(address) {
            Some((url, Route::Collection)) => url,
            Some((_, Route::Item(_))) => return Err(StoreError::unsupported("Insertion", address)),
            None => return Err(StoreError::invalid_address(address)),
        };

        debug!(?values, "inserting book");
        values.validate_for_insert()?;

        let Some(id) = queries::insert_book(self.db.pool(), values).await? else {
            return Ok(None);
        };

        self.notifier.notify(&url);
        Ok(Some(item_uri(self.router.authority(), id)))
    }

    /// Update rows at an address with the present fields.
    ///
    /// An item address qualifies the update to that single id, replacing any
    /// caller-supplied filter. Only present fields are validated and written;
    /// an empty value set returns 0 without touching storage. Notifies the
    /// operation's address iff at least one row changed.
    pub async fn update(
        &self,
        address: &str,
        values: &BookValues,
        filter: Option<&Filter>,
    ) -> Result<u64> {
        let id_filter;
        let (url, effective_filter) = match self.parse(address) {
            Some((url, Route::Collection)) => (url, filter),
            Some((url, Route::Item(id))) => {
                id_filter = Filter::by_id(id);
                (url, Some(&id_filter))
            }
            None => return Err(StoreError::unsupported("Update", address)),
        };

        values.validate()?;
        if values.is_empty() {
            return Ok(0);
        }

        let rows_updated = queries::update_books(self.db.pool(), values, effective_filter).await?;
        if rows_updated > 0 {
            self.notifier.notify(&url);
        }
        Ok(rows_updated)
    }

    /// Delete rows at an address.
    ///
    /// An item address qualifies the delete to that single id, replacing any
    /// caller-supplied filter. Notifies the operation's address iff at least
    /// one row was deleted; 0 is a normal "nothing matched" result.
    pub async fn delete(&self, address: &str, filter: Option<&Filter>) -> Result<u64> {
        let id_filter;
        let (url, effective_filter) = match self.parse(address) {
            Some((url, Route::Collection)) => (url, filter),
            Some((url, Route::Item(id))) => {
                id_filter = Filter::by_id(id);
                (url, Some(&id_filter))
            }
            None => return Err(StoreError::unsupported("Deletion", address)),
        };

        let rows_deleted = queries::delete_books(self.db.pool(), effective_filter).await?;
        if rows_deleted > 0 {
            self.notifier.notify(&url);
        }
        Ok(rows_deleted)
    }

    /// Typed single-row lookup by id
    pub async fn find_book(&self, id: i64) -> Result<Option<Book>> {
        queries::find_book_by_id(self.db.pool(), id).await
    }

    /// Typed listing of all books in id order
    pub async fn list_books(&self) -> Result<Vec<Book>> {
        queries::list_books(self.db.pool()).await
    }

    /// Number of stored books
    pub async fn count_books(&self) -> Result<i64> {
        queries::count_books(self.db.pool()).await
    }

    /// Parse the address once; unparseable strings are unrecognized
    fn parse(&self, address: &str) -> Option<(Url, Route)> {
        let url = Url::parse(address).ok()?;
        let route = self.router.resolve_url(&url)?;
        Some((url, route))
    }
}
