//! Source discovery by filesystem walking.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

/// Options for matching exclude patterns against relative paths.
pub(crate) const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Reference to a discovered source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceRef {
    /// Document identifier (e.g., "index", "guides/setup").
    pub id: String,
    /// Path relative to the source directory.
    pub rel_path: PathBuf,
}

/// Discovers source files by walking the filesystem.
///
/// Hidden files and directories are skipped, as is anything matching one of
/// the exclude patterns. When two files map to the same identifier (e.g.
/// `intro.rst` and `intro.txt`), the earlier suffix in the list wins.
pub(crate) struct Scanner<'a> {
    source_dir: &'a Path,
    suffixes: &'a [String],
    exclude: &'a [Pattern],
}

impl<'a> Scanner<'a> {
    pub fn new(source_dir: &'a Path, suffixes: &'a [String], exclude: &'a [Pattern]) -> Self {
        Self {
            source_dir,
            suffixes,
            exclude,
        }
    }

    /// Scan the filesystem and return source references sorted by identifier.
    ///
    /// Returns an empty Vec if the source directory doesn't exist.
    pub fn scan(&self) -> Vec<SourceRef> {
        let mut found: BTreeMap<String, (usize, PathBuf)> = BTreeMap::new();
        if self.source_dir.exists() {
            self.scan_directory(self.source_dir, "", &mut found);
        }
        found
            .into_iter()
            .map(|(id, (_, rel_path))| SourceRef { id, rel_path })
            .collect()
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        rel_prefix: &str,
        found: &mut BTreeMap<String, (usize, PathBuf)>,
    ) {
        let Ok(entries) = fs::read_dir(dir_path) else {
            return;
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let rel = if rel_prefix.is_empty() {
                name.clone()
            } else {
                format!("{rel_prefix}/{name}")
            };
            if self.is_excluded(&rel) {
                tracing::debug!(path = %rel, "Excluded from scan");
                continue;
            }

            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if is_dir {
                self.scan_directory(&entry.path(), &rel, found);
                continue;
            }

            let Some((priority, id)) = self.file_id(&rel) else {
                continue;
            };
            match found.get(&id) {
                Some((existing, path)) if *existing <= priority => {
                    tracing::warn!(
                        id = %id,
                        kept = %path.display(),
                        skipped = %rel,
                        "Multiple sources for one document"
                    );
                }
                _ => {
                    found.insert(id, (priority, PathBuf::from(rel)));
                }
            }
        }
    }

    fn is_excluded(&self, rel: &str) -> bool {
        self.exclude
            .iter()
            .any(|p| p.matches_with(rel, MATCH_OPTIONS))
    }

    /// Map a relative file path to `(suffix priority, identifier)`.
    fn file_id(&self, rel: &str) -> Option<(usize, String)> {
        self.suffixes.iter().enumerate().find_map(|(i, suffix)| {
            rel.strip_suffix(suffix.as_str())
                .filter(|stem| !stem.is_empty() && !stem.ends_with('/'))
                .map(|stem| (i, stem.to_owned()))
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn ids(refs: &[SourceRef]) -> Vec<&str> {
        refs.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_scan_nested() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "index.rst");
        write(temp.path(), "about/intro.rst");
        write(temp.path(), "notebooks/a/README.rst");
        write(temp.path(), "notes.md");

        let suffixes = vec![".rst".to_owned()];
        let refs = Scanner::new(temp.path(), &suffixes, &[]).scan();

        assert_eq!(ids(&refs), vec!["about/intro", "index", "notebooks/a/README"]);
        assert_eq!(refs[0].rel_path, PathBuf::from("about/intro.rst"));
    }

    #[test]
    fn test_scan_skips_hidden() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "index.rst");
        write(temp.path(), ".hidden.rst");
        write(temp.path(), ".git/HEAD.rst");

        let suffixes = vec![".rst".to_owned()];
        let refs = Scanner::new(temp.path(), &suffixes, &[]).scan();

        assert_eq!(ids(&refs), vec!["index"]);
    }

    #[test]
    fn test_scan_exclude_patterns() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "index.rst");
        write(temp.path(), "_build/html/index.rst");
        write(temp.path(), "drafts/wip.rst");

        let suffixes = vec![".rst".to_owned()];
        let exclude = vec![Pattern::new("_build").unwrap(), Pattern::new("drafts/*").unwrap()];
        let refs = Scanner::new(temp.path(), &suffixes, &exclude).scan();

        assert_eq!(ids(&refs), vec!["index"]);
    }

    #[test]
    fn test_scan_suffix_priority() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "intro.rst");
        write(temp.path(), "intro.txt");

        let suffixes = vec![".txt".to_owned(), ".rst".to_owned()];
        let refs = Scanner::new(temp.path(), &suffixes, &[]).scan();

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].rel_path, PathBuf::from("intro.txt"));
    }

    #[test]
    fn test_scan_missing_dir() {
        let suffixes = vec![".rst".to_owned()];
        let refs = Scanner::new(Path::new("/nonexistent/tocnav"), &suffixes, &[]).scan();

        assert!(refs.is_empty());
    }

    #[test]
    fn test_file_id_requires_stem() {
        let suffixes = vec![".rst".to_owned()];
        let scanner = Scanner::new(Path::new("."), &suffixes, &[]);

        assert_eq!(scanner.file_id("guide.rst"), Some((0, "guide".to_owned())));
        assert_eq!(scanner.file_id(".rst"), None);
        assert_eq!(scanner.file_id("dir/.rst"), None);
        assert_eq!(scanner.file_id("guide.md"), None);
    }
}
