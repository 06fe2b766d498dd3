//! Section title detection.
//!
//! Recognises the two reStructuredText title forms:
//!
//! ```text
//! Underlined         =============
//! ==========         With overline
//!                    =============
//! ```

use crate::error::ParseError;

/// Punctuation characters usable as section adornment.
const ADORNMENT_CHARS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// A detected section title.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Title {
    /// Title text, trimmed.
    pub text: String,
    /// Index of the line after the title's last adornment line.
    pub end: usize,
}

/// Return the adornment character if `line` is a run of one repeated
/// punctuation character starting at column 0.
fn adornment(line: &str) -> Option<(char, usize)> {
    let line = line.trim_end();
    let first = line.chars().next()?;
    if !ADORNMENT_CHARS.contains(first) || !line.chars().all(|c| c == first) {
        return None;
    }
    let len = line.chars().count();
    // `..` and `::` alone are comment and literal block markers
    if len < 2 || line == ".." || line == "::" {
        return None;
    }
    Some((first, len))
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Detect a section title starting at `lines[i]`.
///
/// Returns `Ok(None)` when the lines at `i` do not form a title.
pub(crate) fn title_at(lines: &[&str], i: usize) -> Result<Option<Title>, ParseError> {
    let Some(&line) = lines.get(i) else {
        return Ok(None);
    };

    if let Some((over_char, over_len)) = adornment(line) {
        return overlined_title(lines, i, over_char, over_len);
    }

    if is_blank(line) || line.starts_with(char::is_whitespace) {
        return Ok(None);
    }

    let text = line.trim();
    let width = text.chars().count();
    match lines.get(i + 1).and_then(|next| adornment(next)) {
        Some((_, len)) if len >= width => Ok(Some(Title {
            text: text.to_owned(),
            end: i + 2,
        })),
        _ => Ok(None),
    }
}

fn overlined_title(
    lines: &[&str],
    i: usize,
    over_char: char,
    over_len: usize,
) -> Result<Option<Title>, ParseError> {
    // A lone adornment line followed by a blank line is a transition
    let Some(&text_line) = lines.get(i + 1) else {
        return Ok(None);
    };
    if is_blank(text_line) || adornment(text_line).is_some() {
        return Ok(None);
    }

    let text = text_line.trim();
    match lines.get(i + 2).and_then(|under| adornment(under)) {
        Some((under_char, under_len))
            if under_char == over_char
                && under_len == over_len
                && over_len >= text.chars().count() =>
        {
            Ok(Some(Title {
                text: text.to_owned(),
                end: i + 3,
            }))
        }
        _ => Err(ParseError::UnterminatedTitle { line: i + 1 }),
    }
}
