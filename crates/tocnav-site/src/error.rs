//! Site error types.

use tocnav_rst::ParseError;
use tocnav_storage::StorageError;

/// A toctree entry points at a document that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{referenced_from}:{line}: toctree references missing document `{missing}`")]
pub struct BrokenReferenceError {
    /// The reference as written in the toctree.
    pub missing: String,
    /// Identifier of the document containing the toctree.
    pub referenced_from: String,
    /// 1-based line of the entry.
    pub line: usize,
}

/// A source failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{id}:{source}")]
pub struct DocumentParseError {
    /// Identifier of the failing document.
    pub id: String,
    /// Parser error with line information.
    #[source]
    pub source: ParseError,
}

/// Error returned when building navigation for a document fails.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Storage failure while loading sources.
    #[error("{0}")]
    Storage(#[from] StorageError),
    /// The requested document failed to parse.
    #[error("{0}")]
    Parse(#[from] DocumentParseError),
    /// A toctree entry points at a missing document.
    #[error("{0}")]
    BrokenReference(#[from] BrokenReferenceError),
    /// The requested document is not in the set.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broken_reference_display() {
        let err = BrokenReferenceError {
            missing: "about/glossary.rst".to_owned(),
            referenced_from: "index".to_owned(),
            line: 13,
        };

        assert_eq!(
            err.to_string(),
            "index:13: toctree references missing document `about/glossary.rst`"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err = DocumentParseError {
            id: "index".to_owned(),
            source: ParseError::MissingBlankLine { line: 3 },
        };

        assert_eq!(
            err.to_string(),
            "index:line 3: expected blank line before toctree entries"
        );
    }

    #[test]
    fn test_build_error_from_broken_reference() {
        let err: BuildError = BrokenReferenceError {
            missing: "x".to_owned(),
            referenced_from: "index".to_owned(),
            line: 1,
        }
        .into();

        assert!(matches!(err, BuildError::BrokenReference(_)));
    }
}
