//! Parsed document model.

use crate::options::ToctreeOptions;

/// A parsed reStructuredText document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    /// Document identifier (e.g., "index", "about/intro").
    pub id: String,
    /// First section title, if the document has one.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub title: Option<String>,
    /// Body text with the title and toctree blocks removed.
    pub body: String,
    /// Toctree blocks in source order.
    pub toctrees: Vec<ToctreeBlock>,
}

impl Document {
    /// Create an empty document with the given identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the document title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a toctree block.
    #[must_use]
    pub fn with_toctree(mut self, block: ToctreeBlock) -> Self {
        self.toctrees.push(block);
        self
    }

    /// Directory part of the identifier (`""` for top-level documents).
    #[must_use]
    pub fn dir(&self) -> &str {
        self.id.rsplit_once('/').map_or("", |(dir, _)| dir)
    }
}

/// A single `.. toctree::` directive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ToctreeBlock {
    /// 1-based line of the directive marker.
    pub line: usize,
    /// Directive options.
    pub options: ToctreeOptions,
    /// Entries in source order.
    pub entries: Vec<TocEntry>,
}

impl ToctreeBlock {
    /// Create a block with default options and no entries.
    #[must_use]
    pub fn new(line: usize) -> Self {
        Self {
            line,
            ..Default::default()
        }
    }

    /// Replace the block options.
    #[must_use]
    pub fn with_options(mut self, options: ToctreeOptions) -> Self {
        self.options = options;
        self
    }

    /// Append an entry.
    #[must_use]
    pub fn with_entry(mut self, entry: TocEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

/// What a toctree entry points at.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "kind", content = "value", rename_all = "lowercase")
)]
pub enum EntryTarget {
    /// Literal document reference.
    Document(String),
    /// Glob pattern (only produced inside `:glob:` blocks).
    Pattern(String),
    /// The `self` keyword: a link back to the referencing document.
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    SelfRef,
    /// External URL.
    External(String),
}

/// One entry line of a toctree block.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TocEntry {
    /// Explicit title from `Title <target>` syntax.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub title: Option<String>,
    /// Entry target.
    pub target: EntryTarget,
    /// 1-based source line.
    pub line: usize,
}

impl TocEntry {
    /// Literal document reference without an explicit title.
    #[must_use]
    pub fn document(reference: impl Into<String>, line: usize) -> Self {
        Self {
            title: None,
            target: EntryTarget::Document(reference.into()),
            line,
        }
    }

    /// Glob pattern entry.
    #[must_use]
    pub fn pattern(pattern: impl Into<String>, line: usize) -> Self {
        Self {
            title: None,
            target: EntryTarget::Pattern(pattern.into()),
            line,
        }
    }

    /// Attach an explicit title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Whether the entry expands to zero or more documents at resolution time.
    #[must_use]
    pub fn is_glob(&self) -> bool {
        matches!(self.target, EntryTarget::Pattern(_))
    }
}
