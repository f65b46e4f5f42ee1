//! Resource address routing
//!
//! Resolves incoming addresses to one of the two resource shapes the store
//! serves: the books collection or a single book by id. The routing table is
//! built once at store initialization and owned by the provider instance;
//! there is no ambient global matcher state.

use url::Url;

use crate::contract::{collection_uri, CONTENT_SCHEME, PATH_BOOKS};
use crate::error::{Result, StoreError};

/// Resource shape an address resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The whole books collection
    Collection,
    /// A single book, by id
    Item(i64),
}

/// Immutable routing table for one store authority.
///
/// Recognizes exactly two patterns:
/// - `content://<authority>/books` → [`Route::Collection`]
/// - `content://<authority>/books/<id>` → [`Route::Item`]
///
/// Everything else is unrecognized and reported as `None` from
/// [`Router::resolve`]; callers map that to the error appropriate for their
/// operation.
#[derive(Debug, Clone)]
pub struct Router {
    authority: String,
}

impl Router {
    /// Build the routing table for an authority.
    ///
    /// Fails if the authority does not form a valid `content://` URL, so the
    /// address builders in [`crate::contract`] cannot fail later.
    pub fn new(authority: impl Into<String>) -> Result<Self> {
        let authority = authority.into();
        let base = format!("{}://{}/{}", CONTENT_SCHEME, authority, PATH_BOOKS);
        let parsed = Url::parse(&base).map_err(|_| StoreError::invalid_address(&base))?;
        if parsed.host_str() != Some(authority.as_str()) {
            return Err(StoreError::invalid_address(base));
        }
        Ok(Self { authority })
    }

    /// The authority this table routes for
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// The collection address for this authority
    pub fn collection_uri(&self) -> Url {
        collection_uri(&self.authority)
    }

    /// Resolve an address string to a route, or `None` if unrecognized
    pub fn resolve(&self, address: &str) -> Option<Route> {
        let url = Url::parse(address).ok()?;
        self.resolve_url(&url)
    }

    /// Resolve a parsed address to a route, or `None` if unrecognized
    pub fn resolve_url(&self, address: &Url) -> Option<Route> {
        if address.scheme() != CONTENT_SCHEME {
            return None;
        }
        if address.host_str() != Some(self.authority.as_str()) {
            return None;
        }

        let segments: Vec<&str> = address.path_segments()?.filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [PATH_BOOKS] => Some(Route::Collection),
            [PATH_BOOKS, id] => id.parse::<i64>().ok().map(Route::Item),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::DEFAULT_AUTHORITY;

    fn router() -> Router {
        Router::new(DEFAULT_AUTHORITY).expect("valid authority")
    }

    #[test]
    fn test_resolves_collection() {
        assert_eq!(
            router().resolve("content://com.example.bookstore/books"),
            Some(Route::Collection)
        );
    }

    #[test]
    fn test_resolves_item() {
        assert_eq!(
            router().resolve("content://com.example.bookstore/books/17"),
            Some(Route::Item(17))
        );
    }

    #[test]
    fn test_rejects_foreign_authority() {
        assert_eq!(router().resolve("content://com.example.other/books"), None);
    }

    #[test]
    fn test_rejects_unknown_paths() {
        let r = router();
        assert_eq!(r.resolve("content://com.example.bookstore"), None);
        assert_eq!(r.resolve("content://com.example.bookstore/pens"), None);
        assert_eq!(r.resolve("content://com.example.bookstore/books/17/extra"), None);
        assert_eq!(r.resolve("content://com.example.bookstore/books/abc"), None);
        assert_eq!(r.resolve("https://com.example.bookstore/books"), None);
        assert_eq!(r.resolve("not a uri"), None);
    }

    #[test]
    fn test_trailing_slash_is_collection() {
        // Url normalization leaves an empty trailing segment; it is filtered
        assert_eq!(
            router().resolve("content://com.example.bookstore/books/"),
            Some(Route::Collection)
        );
    }

    #[test]
    fn test_invalid_authority_rejected_at_construction() {
        assert!(Router::new("not a host").is_err());
    }
}
