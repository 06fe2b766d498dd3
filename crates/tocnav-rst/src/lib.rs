//! reStructuredText toctree parser for tocnav.
//!
//! Extracts the pieces of a reStructuredText document that matter for
//! navigation: the document title, the free-form body text, and every
//! `toctree` directive with its options and entries.
//!
//! Everything else (inline markup, roles, other directives) is passed
//! through untouched as body text.
//!
//! # Example
//!
//! ```
//! use tocnav_rst::{TocEntry, parse};
//!
//! let source = "\
//! Welcome
//! =======
//!
//! .. toctree::
//!    :maxdepth: 2
//!    :caption: About
//!
//!    about/intro
//!    Glossary <about/glossary>
//! ";
//!
//! let doc = parse("index", source)?;
//! assert_eq!(doc.title.as_deref(), Some("Welcome"));
//! assert_eq!(doc.toctrees[0].options.maxdepth, Some(2));
//! assert_eq!(doc.toctrees[0].entries[0], TocEntry::document("about/intro", 8));
//! # Ok::<(), tocnav_rst::ParseError>(())
//! ```

mod document;
mod error;
mod options;
mod parser;
mod title;

pub use document::{Document, EntryTarget, TocEntry, ToctreeBlock};
pub use error::ParseError;
pub use options::ToctreeOptions;
pub use parser::parse;
