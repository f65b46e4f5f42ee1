//! Contract for the books table and its content addresses
//!
//! Everything external callers need to talk to the store lives here: the
//! address scheme, the table name, the column set, and the MIME-equivalent
//! type tags a caller can use to negotiate handling of a query result.
//!
//! Addresses have the shape `content://<authority>/books` (the whole
//! collection) or `content://<authority>/books/<id>` (a single book). The
//! authority is configuration-level and identifies this store among others in
//! the same process; see [`crate::config::StoreConfig`].

use url::Url;

/// URI scheme for store addresses
pub const CONTENT_SCHEME: &str = "content";

/// Default authority identifying this store
pub const DEFAULT_AUTHORITY: &str = "com.example.bookstore";

/// Path segment for the books collection
pub const PATH_BOOKS: &str = "books";

/// Name of the books table
pub const TABLE_NAME: &str = "books";

/// MIME-equivalent base type for a list of rows
const DIR_BASE_TYPE: &str = "vnd.bookstore.dir";

/// MIME-equivalent base type for a single row
const ITEM_BASE_TYPE: &str = "vnd.bookstore.item";

/// Columns of the books table.
///
/// `Id` is assigned by the store on insert and never changes; the three
/// NOT-NULL columns (`ProductName`, `Price`, `Quantity`) are validated on
/// every write, the supplier columns are free-form and nullable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Id,
    ProductName,
    Price,
    Quantity,
    SupplierName,
    SupplierPhoneNumber,
}

impl Column {
    /// All columns in table order
    pub const ALL: [Column; 6] = [
        Column::Id,
        Column::ProductName,
        Column::Price,
        Column::Quantity,
        Column::SupplierName,
        Column::SupplierPhoneNumber,
    ];

    /// SQL name of the column
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::ProductName => "product_name",
            Column::Price => "price",
            Column::Quantity => "quantity",
            Column::SupplierName => "supplier_name",
            Column::SupplierPhoneNumber => "supplier_phone_number",
        }
    }

    /// Whether the column is NOT NULL and must be present on insert
    pub fn is_required(&self) -> bool {
        matches!(self, Column::ProductName | Column::Price | Column::Quantity)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type tag reported for the collection address ("list of books")
pub fn content_list_type(authority: &str) -> String {
    format!("{}/{}/{}", DIR_BASE_TYPE, authority, PATH_BOOKS)
}

/// Type tag reported for an item address ("single book")
pub fn content_item_type(authority: &str) -> String {
    format!("{}/{}/{}", ITEM_BASE_TYPE, authority, PATH_BOOKS)
}

/// Build the collection address for an authority
pub fn collection_uri(authority: &str) -> Url {
    Url::parse(&format!("{}://{}/{}", CONTENT_SCHEME, authority, PATH_BOOKS))
        .expect("authority produces a valid URL")
}

/// Build the item address for a book id
pub fn item_uri(authority: &str, id: i64) -> Url {
    Url::parse(&format!(
        "{}://{}/{}/{}",
        CONTENT_SCHEME, authority, PATH_BOOKS, id
    ))
    .expect("authority and id produce a valid URL")
}
