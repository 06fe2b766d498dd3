//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for listing and reading document
//! sources, along with [`StorageError`] for unified error handling across
//! backends.
//!
//! # Identifier Convention
//!
//! All `id` parameters are **document identifiers**, not file paths:
//! - `"index"` - root document (`index.rst`)
//! - `"about/intro"` - nested document (`about/intro.rst`)
//!
//! Implementations handle the mapping from identifiers to their storage
//! format.

use std::path::{Path, PathBuf};

/// Source file discovered by a storage scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceEntry {
    /// Document identifier (e.g., "index", "about/intro").
    pub id: String,
    /// Backend-specific location of the source (relative to the storage root).
    pub path: PathBuf,
}

impl SourceEntry {
    /// Create a new source entry.
    #[must_use]
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }
}

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path, identifier or pattern.
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    path: Option<PathBuf>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    /// Path context, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Backend identifier, if any.
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction for document sources.
///
/// Provides a unified interface for listing and reading sources regardless
/// of backend.
pub trait Storage: Send + Sync {
    /// Scan and return all document sources, sorted by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if scanning fails (e.g., permission denied).
    fn scan(&self) -> Result<Vec<SourceEntry>, StorageError>;

    /// Read the raw source text of a document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document doesn't exist or can't be read.
    fn read(&self, id: &str) -> Result<String, StorageError>;

    /// Check if a document exists.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, id: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_entry_new() {
        let entry = SourceEntry::new("about/intro", "about/intro.rst");

        assert_eq!(entry.id, "about/intro");
        assert_eq!(entry.path, PathBuf::from("about/intro.rst"));
    }

    #[test]
    fn test_storage_error_new() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert!(err.path().is_none());
        assert!(err.backend().is_none());
    }

    #[test]
    fn test_storage_error_not_found() {
        let err = StorageError::not_found("/docs/index.rst");

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.path(), Some(Path::new("/docs/index.rst")));
    }

    #[test]
    fn test_storage_error_io_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = StorageError::io(io_err, None);

        assert_eq!(err.kind(), StorageErrorKind::PermissionDenied);
    }

    #[test]
    fn test_storage_error_io_other() {
        let io_err = std::io::Error::other("boom");
        let err = StorageError::io(io_err, Some(PathBuf::from("x.rst")));

        assert_eq!(err.kind(), StorageErrorKind::Other);
        assert_eq!(err.path(), Some(Path::new("x.rst")));
    }

    #[test]
    fn test_storage_error_display_simple() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_storage_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StorageError::new(StorageErrorKind::NotFound)
            .with_backend("Fs")
            .with_path("/docs/index.rst")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Fs] Not found: file not found (path: /docs/index.rst)"
        );
    }

    #[test]
    fn test_storage_error_source_chain() {
        use std::error::Error;

        let io_err = std::io::Error::other("disk on fire");
        let err = StorageError::io(io_err, None);

        assert_eq!(err.source().unwrap().to_string(), "disk on fire");
    }

    #[test]
    fn test_storage_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageError>();
    }
}
