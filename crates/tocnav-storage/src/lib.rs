//! Storage abstraction for tocnav document sources.
//!
//! This crate provides a [`Storage`] trait for listing and reading the
//! reStructuredText sources that make up a documentation set, so that the
//! resolver can be tested without touching the real filesystem.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `scan()`, `read()`, and `exists()` methods
//! - [`StorageError`] with a semantic [`StorageErrorKind`]
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! The filesystem backend lives in `tocnav-storage-fs`.
//!
//! # Example
//!
//! ```ignore
//! use tocnav_storage::Storage;
//! use tocnav_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new("docs");
//! for source in storage.scan()? {
//!     println!("{} -> {}", source.id, source.path.display());
//! }
//! ```

#[cfg(feature = "mock")]
mod mock;
mod storage;

#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{SourceEntry, Storage, StorageError, StorageErrorKind};
