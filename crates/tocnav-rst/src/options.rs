//! Toctree option parsing.
//!
//! Parses the `:name: value` field list that follows a `.. toctree::` marker.

use std::collections::BTreeMap;

use crate::error::ParseError;

/// Depth used for a bare `:numbered:` flag.
const DEFAULT_NUMBERED_DEPTH: usize = 999;

/// Parsed toctree options.
///
/// Known options are typed; anything else lands in [`extra`](Self::extra)
/// untouched, flags storing an empty string.
///
/// # Example
///
/// ```
/// use tocnav_rst::ToctreeOptions;
///
/// let mut options = ToctreeOptions::default();
/// options.set("maxdepth", "2", 5)?;
/// options.set("glob", "", 6)?;
/// options.set("titlesonly", "", 7)?;
///
/// assert_eq!(options.maxdepth, Some(2));
/// assert!(options.glob);
/// assert_eq!(options.get("titlesonly").as_deref(), Some(""));
/// # Ok::<(), tocnav_rst::ParseError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ToctreeOptions {
    /// Maximum tree depth. `None` means unlimited.
    pub maxdepth: Option<usize>,
    /// Caption shown above the tree.
    pub caption: Option<String>,
    /// Treat wildcard entries as glob patterns.
    pub glob: bool,
    /// Resolve the tree but leave it out of rendered navigation.
    pub hidden: bool,
    /// Reverse entry order after glob expansion.
    pub reversed: bool,
    /// Section numbering depth.
    pub numbered: Option<usize>,
    /// Target name for cross-references.
    pub name: Option<String>,
    /// Unrecognized options, preserved as given.
    pub extra: BTreeMap<String, String>,
}

impl ToctreeOptions {
    /// Apply a single option.
    ///
    /// `value` is the trimmed text after the closing colon (empty for flags).
    pub fn set(&mut self, name: &str, value: &str, line: usize) -> Result<(), ParseError> {
        let invalid = || ParseError::InvalidOptionValue {
            line,
            name: name.to_owned(),
            value: value.to_owned(),
        };

        match name {
            "maxdepth" => {
                let depth: i64 = value.parse().map_err(|_| invalid())?;
                // Sphinx treats zero and negative depths as unlimited
                self.maxdepth = usize::try_from(depth).ok().filter(|&d| d > 0);
            }
            "caption" => {
                if value.is_empty() {
                    return Err(invalid());
                }
                self.caption = Some(value.to_owned());
            }
            "name" => {
                if value.is_empty() {
                    return Err(invalid());
                }
                self.name = Some(value.to_owned());
            }
            "numbered" => {
                self.numbered = if value.is_empty() {
                    Some(DEFAULT_NUMBERED_DEPTH)
                } else {
                    let depth: usize = value.parse().map_err(|_| invalid())?;
                    (depth > 0).then_some(depth)
                };
            }
            "glob" | "hidden" | "reversed" => {
                if !value.is_empty() {
                    return Err(invalid());
                }
                match name {
                    "glob" => self.glob = true,
                    "hidden" => self.hidden = true,
                    _ => self.reversed = true,
                }
            }
            _ => {
                self.extra.insert(name.to_owned(), value.to_owned());
            }
        }

        Ok(())
    }

    /// Get an option value by name, in its source form.
    ///
    /// Flags that are set yield an empty string.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        let flag = |on: bool| on.then(String::new);
        match name {
            "maxdepth" => self.maxdepth.map(|d| d.to_string()),
            "caption" => self.caption.clone(),
            "name" => self.name.clone(),
            "numbered" => self.numbered.map(|d| d.to_string()),
            "glob" => flag(self.glob),
            "hidden" => flag(self.hidden),
            "reversed" => flag(self.reversed),
            _ => self.extra.get(name).cloned(),
        }
    }
}

/// Split an option line into `(name, value)`.
///
/// The line must already be trimmed and start with `:`. Returns `None` when
/// the closing colon is missing or the name is empty or contains whitespace.
pub(crate) fn split_option_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix(':')?;
    let close = rest.find(':')?;
    let name = &rest[..close];
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return None;
    }
    let value = rest[close + 1..].trim();
    // `:name:value` is not a field; docutils needs whitespace after the colon
    if !value.is_empty() && !rest[close + 1..].starts_with(char::is_whitespace) {
        return None;
    }
    Some((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_option_line_with_value() {
        assert_eq!(
            split_option_line(":maxdepth: 2"),
            Some(("maxdepth", "2"))
        );
        assert_eq!(
            split_option_line(":caption: Getting started"),
            Some(("caption", "Getting started"))
        );
    }

    #[test]
    fn test_split_option_line_flag() {
        assert_eq!(split_option_line(":glob:"), Some(("glob", "")));
    }

    #[test]
    fn test_split_option_line_malformed() {
        assert_eq!(split_option_line(":maxdepth 2"), None);
        assert_eq!(split_option_line("::"), None);
        assert_eq!(split_option_line(":max depth: 2"), None);
        assert_eq!(split_option_line(":maxdepth:2"), None);
    }

    #[test]
    fn test_maxdepth() {
        let mut options = ToctreeOptions::default();
        options.set("maxdepth", "3", 1).unwrap();
        assert_eq!(options.maxdepth, Some(3));
    }

    #[test]
    fn test_maxdepth_non_positive_is_unlimited() {
        let mut options = ToctreeOptions::default();
        options.set("maxdepth", "-1", 1).unwrap();
        assert_eq!(options.maxdepth, None);
        options.set("maxdepth", "0", 1).unwrap();
        assert_eq!(options.maxdepth, None);
    }

    #[test]
    fn test_maxdepth_invalid() {
        let mut options = ToctreeOptions::default();
        let err = options.set("maxdepth", "two", 4).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidOptionValue {
                line: 4,
                name: "maxdepth".to_owned(),
                value: "two".to_owned(),
            }
        );
    }

    #[test]
    fn test_caption_requires_value() {
        let mut options = ToctreeOptions::default();
        assert!(options.set("caption", "", 1).is_err());
        options.set("caption", "Guides", 1).unwrap();
        assert_eq!(options.caption.as_deref(), Some("Guides"));
    }

    #[test]
    fn test_flag_rejects_value() {
        let mut options = ToctreeOptions::default();
        assert!(options.set("glob", "yes", 1).is_err());
        assert!(options.set("hidden", "true", 1).is_err());
    }

    #[test]
    fn test_flags() {
        let mut options = ToctreeOptions::default();
        options.set("glob", "", 1).unwrap();
        options.set("hidden", "", 2).unwrap();
        options.set("reversed", "", 3).unwrap();
        assert!(options.glob && options.hidden && options.reversed);
    }

    #[test]
    fn test_numbered() {
        let mut options = ToctreeOptions::default();
        options.set("numbered", "", 1).unwrap();
        assert_eq!(options.numbered, Some(DEFAULT_NUMBERED_DEPTH));
        options.set("numbered", "2", 1).unwrap();
        assert_eq!(options.numbered, Some(2));
        options.set("numbered", "0", 1).unwrap();
        assert_eq!(options.numbered, None);
        assert!(options.set("numbered", "x", 1).is_err());
    }

    #[test]
    fn test_unknown_options_preserved() {
        let mut options = ToctreeOptions::default();
        options.set("titlesonly", "", 1).unwrap();
        options.set("class", "sidebar wide", 2).unwrap();

        assert_eq!(options.extra.len(), 2);
        assert_eq!(options.get("titlesonly").as_deref(), Some(""));
        assert_eq!(options.get("class").as_deref(), Some("sidebar wide"));
        assert_eq!(options.get("missing"), None);
    }

    #[test]
    fn test_get_known_options() {
        let mut options = ToctreeOptions::default();
        options.set("maxdepth", "2", 1).unwrap();
        options.set("glob", "", 2).unwrap();

        assert_eq!(options.get("maxdepth").as_deref(), Some("2"));
        assert_eq!(options.get("glob").as_deref(), Some(""));
        assert_eq!(options.get("hidden"), None);
        assert_eq!(options.get("caption"), None);
    }
}
