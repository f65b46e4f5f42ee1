//! Store configuration
//!
//! The authority and database location are the only configuration this layer
//! takes. Both have sensible defaults; embedding apps usually override the
//! database path with a platform-provided data directory.

use std::path::PathBuf;

use serde::Deserialize;

use crate::contract::DEFAULT_AUTHORITY;

/// Name of the database file
pub const DATABASE_NAME: &str = "books.db";

/// Configuration for one store instance
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Authority identifying this store among others in the same process
    pub authority: String,
    /// Path to the SQLite database file; `None` selects the platform default
    pub database_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            authority: DEFAULT_AUTHORITY.to_string(),
            database_path: None,
        }
    }
}

impl StoreConfig {
    /// Configuration with the default authority and an explicit database path
    pub fn with_database_path(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Resolve the database path, falling back to the platform default
    pub fn resolve_database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(default_database_path)
    }
}

/// Default database path for the platform.
///
/// Mobile embedders should pass an app-specific data directory instead.
pub fn default_database_path() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
            .join("Library")
            .join("Application Support")
            .join("Bookstore")
            .join(DATABASE_NAME)
    }

    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("bookstore")
            .join(DATABASE_NAME)
    }

    #[cfg(target_os = "windows")]
    {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join("Bookstore").join(DATABASE_NAME)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        PathBuf::from(DATABASE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.authority, DEFAULT_AUTHORITY);
        assert!(config.database_path.is_none());
        assert!(config
            .resolve_database_path()
            .to_string_lossy()
            .ends_with(DATABASE_NAME));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"authority": "org.example.library"}"#).expect("valid config");
        assert_eq!(config.authority, "org.example.library");
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_explicit_path() {
        let config = StoreConfig::with_database_path("/tmp/test-books.db");
        assert_eq!(
            config.resolve_database_path(),
            PathBuf::from("/tmp/test-books.db")
        );
    }
}
