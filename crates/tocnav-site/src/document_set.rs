//! The set of known documents, keyed by identifier.

use std::collections::BTreeMap;

use tocnav_rst::Document;

/// Default source suffix stripped from references.
pub(crate) const DEFAULT_SUFFIX: &str = ".rst";

/// All documents of a build, keyed by identifier.
///
/// Identifiers iterate in lexicographic order, which keeps glob expansion
/// deterministic.
#[derive(Clone, Debug)]
pub struct DocumentSet {
    documents: BTreeMap<String, Document>,
    suffixes: Vec<String>,
}

impl Default for DocumentSet {
    fn default() -> Self {
        Self {
            documents: BTreeMap::new(),
            suffixes: vec![DEFAULT_SUFFIX.to_owned()],
        }
    }
}

impl DocumentSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the source suffixes used when matching references.
    #[must_use]
    pub fn with_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.suffixes = suffixes;
        self
    }

    /// Insert a document, returning the one it replaced.
    pub fn insert(&mut self, doc: Document) -> Option<Document> {
        self.documents.insert(doc.id.clone(), doc)
    }

    /// Get a document by exact identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    /// Check whether an identifier is known.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    /// Find the document a normalised reference points at.
    ///
    /// Tries the reference verbatim, then with a source suffix removed, then
    /// with each suffix appended.
    #[must_use]
    pub fn lookup(&self, reference: &str) -> Option<&Document> {
        if let Some(doc) = self.documents.get(reference) {
            return Some(doc);
        }
        self.suffixes.iter().find_map(|suffix| {
            reference
                .strip_suffix(suffix.as_str())
                .and_then(|stem| self.documents.get(stem))
                .or_else(|| self.documents.get(&format!("{reference}{suffix}")))
        })
    }

    /// Source suffixes, in priority order.
    #[must_use]
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Identifiers in lexicographic order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// Documents in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when the set holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl FromIterator<Document> for DocumentSet {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        let mut set = Self::new();
        for doc in iter {
            set.insert(doc);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> DocumentSet {
        ids.iter().map(|id| Document::new(*id)).collect()
    }

    #[test]
    fn test_ids_sorted() {
        let set = set(&["setup", "index", "about/intro"]);
        let ids: Vec<_> = set.ids().collect();
        assert_eq!(ids, vec!["about/intro", "index", "setup"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_lookup_exact() {
        let set = set(&["about/intro.rst"]);
        assert_eq!(set.lookup("about/intro.rst").unwrap().id, "about/intro.rst");
    }

    #[test]
    fn test_lookup_strips_suffix() {
        let set = set(&["about/intro"]);
        assert_eq!(set.lookup("about/intro.rst").unwrap().id, "about/intro");
    }

    #[test]
    fn test_lookup_appends_suffix() {
        let set = set(&["about/intro.rst"]);
        assert_eq!(set.lookup("about/intro").unwrap().id, "about/intro.rst");
    }

    #[test]
    fn test_lookup_custom_suffix() {
        let set = set(&["notes"]).with_suffixes(vec![".txt".to_owned()]);
        assert!(set.lookup("notes.txt").is_some());
        assert!(set.lookup("notes.rst").is_none());
    }

    #[test]
    fn test_lookup_missing() {
        let set = set(&["index"]);
        assert!(set.lookup("about/glossary.rst").is_none());
    }

    #[test]
    fn test_insert_replaces() {
        let mut set = DocumentSet::new();
        assert!(set.insert(Document::new("index")).is_none());
        let old = set.insert(Document::new("index").with_title("Home"));
        assert_eq!(old, Some(Document::new("index")));
        assert_eq!(set.get("index").unwrap().title.as_deref(), Some("Home"));
    }

    #[test]
    fn test_empty() {
        let set = DocumentSet::new();
        assert!(set.is_empty());
        assert!(!set.contains("index"));
    }
}
