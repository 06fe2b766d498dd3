//! Loaded document set with navigation, rendering and integrity checks.

use std::collections::{BTreeSet, VecDeque};

use tocnav_rst::{Document, parse};
use tocnav_storage::{Storage, StorageError};

use crate::document_set::DocumentSet;
use crate::error::{BrokenReferenceError, BuildError, DocumentParseError};
use crate::nav::TocTree;
use crate::render::RenderedPage;
use crate::resolver::{Resolver, display_title};

/// Every source of a documentation tree, parsed.
///
/// Documents that fail to parse are kept as empty placeholders so that
/// references to them still resolve; their errors are available through
/// [`Site::parse_errors`].
#[derive(Debug)]
pub struct Site {
    documents: DocumentSet,
    parse_errors: Vec<DocumentParseError>,
}

/// Result of [`Site::check`].
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Sources that failed to parse.
    pub parse_errors: Vec<DocumentParseError>,
    /// Non-glob entries naming missing documents.
    pub broken_references: Vec<BrokenReferenceError>,
    /// Documents not reachable from the root document.
    pub orphans: Vec<String>,
    /// Number of documents inspected.
    pub documents_checked: usize,
}

impl CheckReport {
    /// True when no errors were found. Orphans are warnings only.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.parse_errors.is_empty() && self.broken_references.is_empty()
    }

    /// Number of errors (parse failures plus broken references).
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.parse_errors.len() + self.broken_references.len()
    }
}

impl Site {
    /// Build a site from an already parsed document set.
    #[must_use]
    pub fn new(documents: DocumentSet) -> Self {
        Self {
            documents,
            parse_errors: Vec::new(),
        }
    }

    /// Scan `storage`, read and parse every source.
    ///
    /// # Arguments
    ///
    /// * `storage` - Source backend
    /// * `suffixes` - Source suffixes accepted in toctree references
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if scanning or reading fails. Parse failures
    /// are collected instead.
    pub fn load(storage: &dyn Storage, suffixes: &[String]) -> Result<Self, StorageError> {
        let mut documents = DocumentSet::new().with_suffixes(suffixes.to_vec());
        let mut parse_errors = Vec::new();

        for entry in storage.scan()? {
            let source = storage.read(&entry.id)?;
            match parse(&entry.id, &source) {
                Ok(doc) => {
                    documents.insert(doc);
                }
                Err(source) => {
                    tracing::warn!(
                        document = %entry.id,
                        path = %entry.path.display(),
                        error = %source,
                        "Failed to parse document"
                    );
                    documents.insert(Document::new(&entry.id));
                    parse_errors.push(DocumentParseError {
                        id: entry.id,
                        source,
                    });
                }
            }
        }

        tracing::info!(
            document_count = documents.len(),
            parse_error_count = parse_errors.len(),
            "Documents loaded"
        );

        Ok(Self {
            documents,
            parse_errors,
        })
    }

    /// All documents.
    #[must_use]
    pub fn documents(&self) -> &DocumentSet {
        &self.documents
    }

    /// Parse failures recorded while loading.
    #[must_use]
    pub fn parse_errors(&self) -> &[DocumentParseError] {
        &self.parse_errors
    }

    /// Find a document by identifier or suffixed path.
    #[must_use]
    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.lookup(id)
    }

    /// Resolve the toctrees of one document.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DocumentNotFound`] for an unknown identifier,
    /// [`BuildError::Parse`] if the document failed to parse, and
    /// [`BuildError::BrokenReference`] if resolution hits a missing document.
    pub fn navigation(&self, id: &str) -> Result<Vec<TocTree>, BuildError> {
        let doc = self.checked_document(id)?;
        Ok(Resolver::new(&self.documents).resolve(doc)?)
    }

    /// Render one document's title, body and navigation.
    ///
    /// # Errors
    ///
    /// Same as [`Site::navigation`].
    pub fn render_page(&self, id: &str) -> Result<RenderedPage, BuildError> {
        let doc = self.checked_document(id)?;
        let navigation = Resolver::new(&self.documents).resolve(doc)?;
        Ok(RenderedPage {
            id: doc.id.clone(),
            title: display_title(doc),
            body: doc.body.clone(),
            navigation,
        })
    }

    /// Check link integrity of every document.
    ///
    /// Collects all parse errors and all broken references, and lists the
    /// documents not reachable from `root_doc` through toctrees.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DocumentNotFound`] if `root_doc` does not exist.
    pub fn check(&self, root_doc: &str) -> Result<CheckReport, BuildError> {
        let root = self
            .documents
            .lookup(root_doc)
            .ok_or_else(|| BuildError::DocumentNotFound(root_doc.to_owned()))?;
        let resolver = Resolver::new(&self.documents);

        let broken_references = self
            .documents
            .iter()
            .flat_map(|doc| resolver.broken_references(doc))
            .collect();

        let mut reachable = BTreeSet::from([root.id.as_str()]);
        let mut queue = VecDeque::from([root]);
        while let Some(doc) = queue.pop_front() {
            for id in resolver.referenced_ids(doc) {
                if reachable.insert(id)
                    && let Some(next) = self.documents.get(id)
                {
                    queue.push_back(next);
                }
            }
        }
        let orphans: Vec<String> = self
            .documents
            .ids()
            .filter(|id| !reachable.contains(id))
            .map(str::to_owned)
            .collect();
        for orphan in &orphans {
            tracing::debug!(document = %orphan, "Document is not in any toctree");
        }

        Ok(CheckReport {
            parse_errors: self.parse_errors.clone(),
            broken_references,
            orphans,
            documents_checked: self.documents.len(),
        })
    }

    fn checked_document(&self, id: &str) -> Result<&Document, BuildError> {
        let doc = self
            .documents
            .lookup(id)
            .ok_or_else(|| BuildError::DocumentNotFound(id.to_owned()))?;
        if let Some(err) = self.parse_errors.iter().find(|e| e.id == doc.id) {
            return Err(err.clone().into());
        }
        Ok(doc)
    }
}
