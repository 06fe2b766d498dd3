//! Toctree resolution and navigation for tocnav.
//!
//! This crate turns parsed documents into navigation:
//!
//! - [`DocumentSet`]: all known documents, keyed by identifier
//! - [`Resolver`]: resolves toctree entries (literal, glob, `self`, URLs)
//!   into [`TocTree`]s of [`NavNode`]s, failing with
//!   [`BrokenReferenceError`] on missing documents
//! - [`Site`]: loads every source from a [`Storage`](tocnav_storage::Storage),
//!   renders pages and runs link-integrity checks
//! - [`render_text`] / [`render_html`]: output for resolved navigation
//!
//! # Example
//!
//! ```
//! use tocnav_rst::{Document, TocEntry, ToctreeBlock};
//! use tocnav_site::{DocumentSet, Resolver};
//!
//! let index = Document::new("index").with_toctree(
//!     ToctreeBlock::new(4).with_entry(TocEntry::document("about/intro.rst", 6)),
//! );
//! let set: DocumentSet = [index, Document::new("about/intro.rst").with_title("Introduction")]
//!     .into_iter()
//!     .collect();
//!
//! let trees = Resolver::new(&set).resolve(set.get("index").unwrap()).unwrap();
//! assert_eq!(trees[0].nodes[0].id, "about/intro.rst");
//! assert_eq!(trees[0].nodes[0].title, "Introduction");
//! ```

mod document_set;
mod error;
mod nav;
mod reference;
mod render;
mod resolver;
mod site;

pub use document_set::DocumentSet;
pub use error::{BrokenReferenceError, BuildError, DocumentParseError};
pub use nav::{NavNode, TocTree};
pub use render::{
    RenderedPage, escape_html, render_html, render_html_with_suffixes, render_text,
};
pub use resolver::Resolver;
pub use site::{CheckReport, Site};
