// Bookstore Core - Inventory data layer for the bookstore app
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! SQL execution for the books table
//!
//! Free async functions over the connection pool, one per operation shape.
//! Write statements are built from the columns present in a [`BookValues`],
//! so a partial update touches exactly the supplied fields. Validation and
//! routing happen above this layer in the provider; these functions execute
//! whatever they are handed.

use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::error;

use crate::contract::{Column, TABLE_NAME};
use crate::error::Result;
use crate::storage::models::{Book, BookValues};

/// A typed argument bound into a filter clause
#[derive(Debug, Clone, PartialEq)]
pub enum FilterArg {
    Text(String),
    Int(i64),
    Real(f64),
}

/// Row filter: a SQL predicate with `?` placeholders and its arguments.
///
/// The clause is caller-owned SQL, the arguments are always bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    clause: String,
    args: Vec<FilterArg>,
}

impl Filter {
    pub fn new(clause: impl Into<String>, args: Vec<FilterArg>) -> Self {
        Self {
            clause: clause.into(),
            args,
        }
    }

    /// Filter qualifying a single row by id
    pub fn by_id(id: i64) -> Self {
        Self::new(format!("{} = ?", Column::Id), vec![FilterArg::Int(id)])
    }

    pub fn clause(&self) -> &str {
        &self.clause
    }
}

/// Requested result ordering; natural (rowid) order when unspecified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: Column,
    pub descending: bool,
}

impl SortOrder {
    pub fn ascending(column: Column) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    pub fn descending(column: Column) -> Self {
        Self {
            column,
            descending: true,
        }
    }

    fn to_sql(self) -> String {
        format!(
            "{} {}",
            self.column,
            if self.descending { "DESC" } else { "ASC" }
        )
    }
}

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

fn bind_filter_args<'q>(mut query: SqliteQuery<'q>, filter: &'q Filter) -> SqliteQuery<'q> {
    for arg in &filter.args {
        query = match arg {
            FilterArg::Text(s) => query.bind(s.as_str()),
            FilterArg::Int(i) => query.bind(*i),
            FilterArg::Real(r) => query.bind(*r),
        };
    }
    query
}

fn bind_value_columns<'q>(
    mut query: SqliteQuery<'q>,
    values: &'q BookValues,
    columns: &[Column],
) -> SqliteQuery<'q> {
    for column in columns {
        query = match column {
            Column::ProductName => query.bind(values.product_name.as_deref()),
            Column::Price => query.bind(values.price),
            Column::Quantity => query.bind(values.quantity),
            Column::SupplierName => query.bind(values.supplier_name.as_ref().and_then(|v| v.as_deref())),
            Column::SupplierPhoneNumber => {
                query.bind(values.supplier_phone_number.as_ref().and_then(|v| v.as_deref()))
            }
            // Id is never written
            Column::Id => query,
        };
    }
    query
}

/// Insert a new book row from the present columns.
///
/// Returns the assigned id, or `None` when the engine rejects the row
/// (soft failure; the caller reports "not saved" rather than an error).
/// Validation must already have passed.
pub async fn insert_book(pool: &SqlitePool, values: &BookValues) -> Result<Option<i64>> {
    let columns = values.present_columns();
    let names: Vec<&str> = columns.iter().map(Column::as_str).collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        TABLE_NAME,
        names.join(", "),
        placeholders
    );

    let query = bind_value_columns(sqlx::query(&sql), values, &columns);
    match query.execute(pool).await {
        Ok(result) => Ok(Some(result.last_insert_rowid())),
        Err(sqlx::Error::Database(db_err)) => {
            error!(error = %db_err, "failed to insert row");
            Ok(None)
        }
        Err(other) => Err(other.into()),
    }
}

/// Query book rows, projected to the requested columns.
///
/// An empty or absent projection selects all columns. Rows come back as
/// [`BookValues`] carrying exactly the projected columns.
pub async fn query_books(
    pool: &SqlitePool,
    projection: Option<&[Column]>,
    filter: Option<&Filter>,
    order: Option<SortOrder>,
) -> Result<Vec<BookValues>> {
    let columns: &[Column] = match projection {
        Some(cols) if !cols.is_empty() => cols,
        _ => &Column::ALL,
    };
    let names: Vec<&str> = columns.iter().map(Column::as_str).collect();

    let mut sql = format!("SELECT {} FROM {}", names.join(", "), TABLE_NAME);
    if let Some(filter) = filter {
        sql.push_str(" WHERE ");
        sql.push_str(filter.clause());
    }
    if let Some(order) = order {
        sql.push_str(" ORDER BY ");
        sql.push_str(&order.to_sql());
    }

    let mut query = sqlx::query(&sql);
    if let Some(filter) = filter {
        query = bind_filter_args(query, filter);
    }

    let rows = query.fetch_all(pool).await?;
    rows.iter().map(|row| row_to_values(row, columns)).collect()
}

fn row_to_values(row: &SqliteRow, columns: &[Column]) -> Result<BookValues> {
    let mut values = BookValues::new();
    for column in columns {
        match column {
            Column::Id => values.id = Some(row.try_get(column.as_str())?),
            Column::ProductName => values.product_name = Some(row.try_get(column.as_str())?),
            Column::Price => values.price = Some(row.try_get(column.as_str())?),
            Column::Quantity => values.quantity = Some(row.try_get(column.as_str())?),
            Column::SupplierName => values.supplier_name = Some(row.try_get(column.as_str())?),
            Column::SupplierPhoneNumber => {
                values.supplier_phone_number = Some(row.try_get(column.as_str())?)
            }
        }
    }
    Ok(values)
}

/// Update the present columns on all rows matching the filter.
///
/// Returns the number of rows updated. The caller is responsible for
/// rejecting invalid values and skipping empty value sets beforehand.
pub async fn update_books(
    pool: &SqlitePool,
    values: &BookValues,
    filter: Option<&Filter>,
) -> Result<u64> {
    let columns = values.present_columns();
    let assignments: Vec<String> = columns.iter().map(|c| format!("{} = ?", c)).collect();

    let mut sql = format!("UPDATE {} SET {}", TABLE_NAME, assignments.join(", "));
    if let Some(filter) = filter {
        sql.push_str(" WHERE ");
        sql.push_str(filter.clause());
    }

    let mut query = bind_value_columns(sqlx::query(&sql), values, &columns);
    if let Some(filter) = filter {
        query = bind_filter_args(query, filter);
    }

    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}

/// Delete all rows matching the filter; no filter deletes every row.
///
/// Returns the number of rows deleted; 0 means nothing matched.
pub async fn delete_books(pool: &SqlitePool, filter: Option<&Filter>) -> Result<u64> {
    let mut sql = format!("DELETE FROM {}", TABLE_NAME);
    if let Some(filter) = filter {
        sql.push_str(" WHERE ");
        sql.push_str(filter.clause());
    }

    let mut query = sqlx::query(&sql);
    if let Some(filter) = filter {
        query = bind_filter_args(query, filter);
    }

    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}

/// Find a book by id as a fully typed row
pub async fn find_book_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Book>> {
    let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(book)
}

/// List all books in id order
pub async fn list_books(pool: &SqlitePool) -> Result<Vec<Book>> {
    let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(books)
}

/// Count all books
pub async fn count_books(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::database::Database;

    fn dune() -> BookValues {
        BookValues::new()
            .product_name("Dune")
            .price(9.99)
            .quantity(3)
            .supplier_name("Chilton")
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let db = Database::new_in_memory().await.expect("Failed to create database");

        let id = insert_book(db.pool(), &dune())
            .await
            .expect("Failed to insert")
            .expect("Insert produced an id");
        assert!(id > 0);

        let book = find_book_by_id(db.pool(), id)
            .await
            .expect("Failed to query")
            .expect("Book exists");
        assert_eq!(book.product_name, "Dune");
        assert_eq!(book.price, 9.99);
        assert_eq!(book.quantity, 3);
        assert_eq!(book.supplier_name.as_deref(), Some("Chilton"));
        assert_eq!(book.supplier_phone_number, None);
    }

    #[tokio::test]
    async fn test_ids_are_monotonic_and_never_reused() {
        let db = Database::new_in_memory().await.expect("Failed to create database");

        let first = insert_book(db.pool(), &dune()).await.unwrap().unwrap();
        let second = insert_book(db.pool(), &dune()).await.unwrap().unwrap();
        assert!(second > first);

        delete_books(db.pool(), Some(&Filter::by_id(second)))
            .await
            .expect("Failed to delete");

        // AUTOINCREMENT: the freed id is not handed out again
        let third = insert_book(db.pool(), &dune()).await.unwrap().unwrap();
        assert!(third > second);
    }

    #[tokio::test]
    async fn test_insert_soft_failure_returns_none() {
        let db = Database::new_in_memory().await.expect("Failed to create database");

        // Engine-level failure distinct from validation: table is gone
        sqlx::query("DROP TABLE books")
            .execute(db.pool())
            .await
            .expect("Failed to drop table");

        let result = insert_book(db.pool(), &dune()).await.expect("Soft failure is not an error");
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_query_projection() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        insert_book(db.pool(), &dune()).await.unwrap().unwrap();

        let rows = query_books(
            db.pool(),
            Some(&[Column::Id, Column::ProductName]),
            None,
            None,
        )
        .await
        .expect("Failed to query");

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.id, Some(1));
        assert_eq!(row.product_name.as_deref(), Some("Dune"));
        assert!(row.price.is_none());
        assert!(row.quantity.is_none());
        assert!(row.supplier_name.is_none());
    }

    #[tokio::test]
    async fn test_query_filter_and_order() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        insert_book(db.pool(), &dune()).await.unwrap().unwrap();
        insert_book(
            db.pool(),
            &BookValues::new().product_name("Hyperion").price(12.50).quantity(1),
        )
        .await
        .unwrap()
        .unwrap();
        insert_book(
            db.pool(),
            &BookValues::new().product_name("Foundation").price(7.25).quantity(9),
        )
        .await
        .unwrap()
        .unwrap();

        let cheap = query_books(
            db.pool(),
            None,
            Some(&Filter::new("price < ?", vec![FilterArg::Real(10.0)])),
            Some(SortOrder::descending(Column::Price)),
        )
        .await
        .expect("Failed to query");

        let names: Vec<_> = cheap.iter().map(|r| r.product_name.clone().unwrap()).collect();
        assert_eq!(names, vec!["Dune", "Foundation"]);
    }

    #[tokio::test]
    async fn test_partial_update_touches_only_present_fields() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        let id = insert_book(db.pool(), &dune()).await.unwrap().unwrap();

        let updated = update_books(
            db.pool(),
            &BookValues::new().quantity(2),
            Some(&Filter::by_id(id)),
        )
        .await
        .expect("Failed to update");
        assert_eq!(updated, 1);

        let book = find_book_by_id(db.pool(), id).await.unwrap().unwrap();
        assert_eq!(book.quantity, 2);
        assert_eq!(book.product_name, "Dune");
        assert_eq!(book.price, 9.99);
        assert_eq!(book.supplier_name.as_deref(), Some("Chilton"));
    }

    #[tokio::test]
    async fn test_update_can_null_supplier() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        let id = insert_book(db.pool(), &dune()).await.unwrap().unwrap();

        let updated = update_books(
            db.pool(),
            &BookValues::new().clear_supplier_name(),
            Some(&Filter::by_id(id)),
        )
        .await
        .expect("Failed to update");
        assert_eq!(updated, 1);

        let book = find_book_by_id(db.pool(), id).await.unwrap().unwrap();
        assert_eq!(book.supplier_name, None);
    }

    #[tokio::test]
    async fn test_delete_counts() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        insert_book(db.pool(), &dune()).await.unwrap().unwrap();
        insert_book(db.pool(), &dune()).await.unwrap().unwrap();

        let deleted = delete_books(db.pool(), Some(&Filter::by_id(999))).await.unwrap();
        assert_eq!(deleted, 0);

        let deleted = delete_books(db.pool(), None).await.unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(count_books(db.pool()).await.unwrap(), 0);
    }
}
