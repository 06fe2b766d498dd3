//! Line-based toctree parser.
//!
//! Walks the document once, pulling out the first section title and every
//! `.. toctree::` block. All other lines become body text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::document::{Document, EntryTarget, TocEntry, ToctreeBlock};
use crate::error::ParseError;
use crate::options::split_option_line;
use crate::title::title_at;

/// `Title <target>` entry syntax.
static EXPLICIT_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*<([^<>]+)>$").unwrap());

/// Absolute URLs (`scheme://...`) and `mailto:` links.
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.\-]*://|mailto:)").unwrap());

const DIRECTIVE_NAME: &str = "toctree";

/// Parse a reStructuredText document.
///
/// # Arguments
///
/// * `id` - Document identifier stored on the result
/// * `source` - Raw document text
///
/// # Errors
///
/// Returns [`ParseError`] with the offending line when a toctree block or a
/// section title is malformed.
pub fn parse(id: &str, source: &str) -> Result<Document, ParseError> {
    let lines: Vec<&str> = source.lines().collect();
    let mut doc = Document::new(id);
    let mut body: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        if let Some(indent) = directive_marker(lines[i], i + 1)? {
            let (block, next) = parse_block(&lines, i, indent)?;
            doc.toctrees.push(block);
            i = next;
            continue;
        }

        if let Some(title) = title_at(&lines, i)? {
            if doc.title.is_none() {
                doc.title = Some(title.text);
            } else {
                body.extend_from_slice(&lines[i..title.end]);
            }
            i = title.end;
            continue;
        }

        body.push(lines[i]);
        i += 1;
    }

    doc.body = join_body(&body);
    Ok(doc)
}

/// Check whether a line opens a toctree directive.
///
/// Returns the marker's indentation on success.
fn directive_marker(line: &str, line_no: usize) -> Result<Option<usize>, ParseError> {
    let trimmed = line.trim_start();
    let Some(rest) = trimmed.strip_prefix("..") else {
        return Ok(None);
    };
    if !rest.starts_with(char::is_whitespace) {
        return Ok(None);
    }
    let Some(after_name) = rest.trim_start().strip_prefix(DIRECTIVE_NAME) else {
        return Ok(None);
    };

    if let Some(argument) = after_name.strip_prefix("::") {
        let argument = argument.trim();
        if !argument.is_empty() {
            return Err(ParseError::UnexpectedArgument {
                line: line_no,
                argument: argument.to_owned(),
            });
        }
        return Ok(Some(indent_of(line)));
    }

    // `.. toctree:` or `.. toctree ::` look like a directive but are not one
    let tail = after_name.trim_start();
    if tail.is_empty() || tail.starts_with(':') {
        return Err(ParseError::MalformedDirective {
            line: line_no,
            text: trimmed.trim_end().to_owned(),
        });
    }

    Ok(None)
}

/// Parse the options and entries of a block whose marker is at `start`.
///
/// Returns the block and the index of the first line after it.
fn parse_block(
    lines: &[&str],
    start: usize,
    marker_indent: usize,
) -> Result<(ToctreeBlock, usize), ParseError> {
    let mut block = ToctreeBlock::new(start + 1);
    let inside = |line: &str| is_blank(line) || indent_of(line) > marker_indent;

    let mut seen = HashSet::new();
    let mut i = start + 1;
    while let Some(&line) = lines.get(i) {
        if is_blank(line) || !inside(line) {
            break;
        }
        let text = line.trim();
        if !text.starts_with(':') {
            return Err(ParseError::MissingBlankLine { line: i + 1 });
        }
        let (name, value) = split_option_line(text).ok_or_else(|| ParseError::MalformedOption {
            line: i + 1,
            text: text.to_owned(),
        })?;
        if !seen.insert(name) {
            return Err(ParseError::DuplicateOption {
                line: i + 1,
                name: name.to_owned(),
            });
        }
        block.options.set(name, value, i + 1)?;
        i += 1;
    }

    let mut entry_indent = None;
    while let Some(&line) = lines.get(i) {
        if !inside(line) {
            break;
        }
        i += 1;
        if is_blank(line) {
            continue;
        }

        let indent = indent_of(line);
        match entry_indent {
            None => entry_indent = Some(indent),
            Some(expected) if expected != indent => {
                return Err(ParseError::InconsistentIndentation { line: i });
            }
            Some(_) => {}
        }

        let text = line.trim();
        if is_comment(text) {
            continue;
        }
        block
            .entries
            .push(parse_entry(text, i, block.options.glob));
    }

    Ok((block, i))
}

/// Parse one entry line.
fn parse_entry(text: &str, line: usize, glob: bool) -> TocEntry {
    let (title, reference) = match EXPLICIT_TITLE_RE.captures(text) {
        Some(caps) => (Some(caps[1].trim().to_owned()), caps[2].trim().to_owned()),
        None => (None, text.to_owned()),
    };

    let target = if reference == "self" {
        EntryTarget::SelfRef
    } else if URL_RE.is_match(&reference) {
        EntryTarget::External(reference)
    } else if glob && title.is_none() && has_glob_chars(&reference) {
        EntryTarget::Pattern(reference)
    } else {
        EntryTarget::Document(reference)
    };

    TocEntry {
        title,
        target,
        line,
    }
}

fn has_glob_chars(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

fn is_comment(text: &str) -> bool {
    text == ".." || text.starts_with(".. ")
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Join body lines, collapsing blank runs and trimming blank edges.
fn join_body(lines: &[&str]) -> String {
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    for &line in lines {
        if is_blank(line) {
            if out.last().is_some_and(|last| !last.is_empty()) {
                out.push("");
            }
        } else {
            out.push(line.trim_end());
        }
    }
    while out.last().is_some_and(|last| last.is_empty()) {
        out.pop();
    }
    out.join("\n")
}
