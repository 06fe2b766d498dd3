//! Reference path normalisation.

/// Join a toctree reference onto the referencing document's directory.
///
/// A leading `/` makes the reference relative to the source root. `.` and
/// `..` segments are folded; `..` above the root is dropped.
///
/// ```text
/// join_reference("guides", "setup/nci")   -> "guides/setup/nci"
/// join_reference("guides", "../about")    -> "about"
/// join_reference("guides", "/index")      -> "index"
/// ```
pub(crate) fn join_reference(base_dir: &str, reference: &str) -> String {
    let (base, rel) = match reference.strip_prefix('/') {
        Some(absolute) => ("", absolute),
        None => (base_dir, reference),
    };

    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for segment in rel.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// Relative link from one document's page to another's.
///
/// A trailing source suffix on `to_id` is replaced by `.html`.
///
/// ```text
/// relative_href("index", "about/intro")        -> "about/intro.html"
/// relative_href("guides/setup", "about/intro") -> "../about/intro.html"
/// relative_href("index", "about/intro.rst")    -> "about/intro.html"
/// ```
pub(crate) fn relative_href<S: AsRef<str>>(from_id: &str, to_id: &str, suffixes: &[S]) -> String {
    let depth = from_id.matches('/').count();
    let page = suffixes
        .iter()
        .find_map(|suffix| to_id.strip_suffix(suffix.as_ref()))
        .unwrap_or(to_id);
    format!("{}{page}.html", "../".repeat(depth))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_top_level() {
        assert_eq!(join_reference("", "about/intro.rst"), "about/intro.rst");
    }

    #[test]
    fn test_join_relative() {
        assert_eq!(join_reference("guides", "setup/nci"), "guides/setup/nci");
    }

    #[test]
    fn test_join_parent() {
        assert_eq!(join_reference("guides/setup", "../../about"), "about");
        assert_eq!(join_reference("guides", "../../../about"), "about");
    }

    #[test]
    fn test_join_absolute() {
        assert_eq!(join_reference("guides", "/index"), "index");
    }

    #[test]
    fn test_join_dot_segments() {
        assert_eq!(join_reference("a", "./b//c"), "a/b/c");
    }

    #[test]
    fn test_join_keeps_glob_chars() {
        assert_eq!(join_reference("", "notebooks/*/README"), "notebooks/*/README");
        assert_eq!(join_reference("api", "*"), "api/*");
    }

    const SUFFIXES: [&str; 1] = [".rst"];

    #[test]
    fn test_relative_href() {
        assert_eq!(
            relative_href("index", "about/intro", &SUFFIXES),
            "about/intro.html"
        );
        assert_eq!(
            relative_href("guides/setup", "about/intro", &SUFFIXES),
            "../about/intro.html"
        );
    }

    #[test]
    fn test_relative_href_strips_source_suffix() {
        assert_eq!(
            relative_href("index", "about/intro.rst", &SUFFIXES),
            "about/intro.html"
        );
        assert_eq!(
            relative_href("index", "notes.txt", &[".rst", ".txt"]),
            "notes.html"
        );
        assert_eq!(relative_href("index", "v1.2", &SUFFIXES), "v1.2.html");
    }
}
