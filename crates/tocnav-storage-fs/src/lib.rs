//! Filesystem storage implementation for tocnav.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of
//! the [`Storage`](tocnav_storage::Storage) trait. It handles:
//!
//! - Recursive directory scanning for source files (`.rst` by default)
//! - Exclude patterns (`_build`, `drafts/*`) relative to the source directory
//! - Mapping between document identifiers and files
//!
//! # Example
//!
//! ```ignore
//! use tocnav_storage::Storage;
//! use tocnav_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new("docs");
//! for source in storage.scan()? {
//!     println!("{}", source.id);
//! }
//! ```

mod scanner;

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tocnav_storage::{SourceEntry, Storage, StorageError, StorageErrorKind};

use scanner::Scanner;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default source suffix.
const DEFAULT_SUFFIX: &str = ".rst";

/// Filesystem storage implementation.
///
/// Scans a source directory recursively for files ending in one of the
/// configured suffixes. A file `guides/setup.rst` becomes document
/// `guides/setup`.
#[derive(Debug)]
pub struct FsStorage {
    source_dir: PathBuf,
    suffixes: Vec<String>,
    exclude: Vec<Pattern>,
}

impl FsStorage {
    /// Create storage rooted at `source_dir` with the default `.rst` suffix.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            suffixes: vec![DEFAULT_SUFFIX.to_owned()],
            exclude: Vec::new(),
        }
    }

    /// Replace the source suffixes. Earlier suffixes win on conflicts.
    #[must_use]
    pub fn with_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.suffixes = suffixes;
        self
    }

    /// Set glob patterns for paths to leave out of scans.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::InvalidPath`] if a pattern is not a valid glob.
    pub fn with_exclude_patterns(mut self, patterns: &[String]) -> Result<Self, StorageError> {
        self.exclude = patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    StorageError::new(StorageErrorKind::InvalidPath)
                        .with_backend(BACKEND)
                        .with_path(p)
                        .with_source(e)
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Root directory of the sources.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Source suffixes in priority order.
    #[must_use]
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    fn suffix_hint(&self) -> &str {
        self.suffixes.first().map_or(DEFAULT_SUFFIX, String::as_str)
    }

    /// Find the file backing a document identifier.
    fn resolve(&self, id: &str) -> Option<PathBuf> {
        if id.is_empty() || id.split('/').any(|seg| seg.is_empty() || seg == "..") {
            return None;
        }
        self.suffixes
            .iter()
            .map(|suffix| self.source_dir.join(format!("{id}{suffix}")))
            .find(|path| path.is_file())
    }
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<SourceEntry>, StorageError> {
        if !self.source_dir.is_dir() {
            return Err(StorageError::not_found(&self.source_dir).with_backend(BACKEND));
        }

        let refs = Scanner::new(&self.source_dir, &self.suffixes, &self.exclude).scan();
        tracing::debug!(
            source_dir = %self.source_dir.display(),
            document_count = refs.len(),
            "Source scan completed"
        );

        Ok(refs
            .into_iter()
            .map(|r| SourceEntry::new(r.id, r.rel_path))
            .collect())
    }

    fn read(&self, id: &str) -> Result<String, StorageError> {
        let path = self.resolve(id).ok_or_else(|| {
            StorageError::not_found(self.source_dir.join(format!("{id}{}", self.suffix_hint())))
                .with_backend(BACKEND)
        })?;
        fs::read_to_string(&path)
            .map_err(|e| StorageError::io(e, Some(path)).with_backend(BACKEND))
    }

    fn exists(&self, id: &str) -> bool {
        self.resolve(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn create_docs() -> tempfile::TempDir {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("about")).unwrap();
        fs::write(temp.path().join("index.rst"), "Home\n====\n").unwrap();
        fs::write(temp.path().join("about/intro.rst"), "Intro\n=====\n").unwrap();
        temp
    }

    #[test]
    fn test_scan() {
        let temp = create_docs();
        let storage = FsStorage::new(temp.path());

        let sources = storage.scan().unwrap();

        assert_eq!(
            sources,
            vec![
                SourceEntry::new("about/intro", "about/intro.rst"),
                SourceEntry::new("index", "index.rst"),
            ]
        );
    }

    #[test]
    fn test_scan_missing_source_dir() {
        let storage = FsStorage::new("/nonexistent/tocnav/docs");
        let err = storage.scan().unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.backend(), Some("Fs"));
    }

    #[test]
    fn test_read() {
        let temp = create_docs();
        let storage = FsStorage::new(temp.path());

        assert_eq!(storage.read("about/intro").unwrap(), "Intro\n=====\n");
    }

    #[test]
    fn test_read_missing() {
        let temp = create_docs();
        let storage = FsStorage::new(temp.path());

        let err = storage.read("about/glossary").unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert!(err.to_string().contains("glossary.rst"));
    }

    #[test]
    fn test_read_rejects_parent_segments() {
        let temp = create_docs();
        let storage = FsStorage::new(temp.path().join("about"));

        assert!(!storage.exists("../index"));
        assert!(storage.read("../index").is_err());
    }

    #[test]
    fn test_exists() {
        let temp = create_docs();
        let storage = FsStorage::new(temp.path());

        assert!(storage.exists("index"));
        assert!(!storage.exists("missing"));
        assert!(!storage.exists(""));
    }

    #[test]
    fn test_custom_suffixes() {
        let temp = create_docs();
        fs::write(temp.path().join("notes.txt"), "Notes\n=====\n").unwrap();
        let storage = FsStorage::new(temp.path()).with_suffixes(vec![".txt".to_owned()]);

        let ids: Vec<_> = storage.scan().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["notes"]);
        assert!(storage.exists("notes"));
    }

    #[test]
    fn test_exclude_patterns() {
        let temp = create_docs();
        let storage = FsStorage::new(temp.path())
            .with_exclude_patterns(&["about/**".to_owned()])
            .unwrap();

        let ids: Vec<_> = storage.scan().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["index"]);
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let err = FsStorage::new("docs")
            .with_exclude_patterns(&["[unclosed".to_owned()])
            .unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::InvalidPath);
    }
}
