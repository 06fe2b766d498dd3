//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::storage::{SourceEntry, Storage, StorageError};

/// Mock storage for testing.
///
/// Stores document sources in memory. Use the builder methods to configure
/// the mock with test data.
///
/// # Example
///
/// ```ignore
/// use tocnav_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_document("index", ".. toctree::\n\n   intro\n")
///     .with_document("intro", "Intro\n=====\n");
///
/// let sources = storage.scan().unwrap();
/// let content = storage.read("intro").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    documents: BTreeMap<String, String>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with the given identifier and source text.
    #[must_use]
    pub fn with_document(mut self, id: impl Into<String>, content: impl Into<String>) -> Self {
        self.documents.insert(id.into(), content.into());
        self
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<SourceEntry>, StorageError> {
        Ok(self
            .documents
            .keys()
            .map(|id| SourceEntry::new(id.clone(), PathBuf::from(format!("{id}.rst"))))
            .collect())
    }

    fn read(&self, id: &str) -> Result<String, StorageError> {
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::not_found(format!("{id}.rst")).with_backend("Mock"))
    }

    fn exists(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageErrorKind;

    #[test]
    fn test_scan_is_sorted() {
        let storage = MockStorage::new()
            .with_document("setup", "")
            .with_document("index", "")
            .with_document("about/intro", "");

        let ids: Vec<_> = storage.scan().unwrap().into_iter().map(|s| s.id).collect();

        assert_eq!(ids, vec!["about/intro", "index", "setup"]);
    }

    #[test]
    fn test_read() {
        let storage = MockStorage::new().with_document("index", "Home\n====\n");

        assert_eq!(storage.read("index").unwrap(), "Home\n====\n");
    }

    #[test]
    fn test_read_missing() {
        let storage = MockStorage::new();
        let err = storage.read("missing").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.backend(), Some("Mock"));
    }

    #[test]
    fn test_exists() {
        let storage = MockStorage::new().with_document("index", "");

        assert!(storage.exists("index"));
        assert!(!storage.exists("other"));
    }
}
