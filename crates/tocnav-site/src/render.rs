//! Text and HTML rendering of resolved navigation.
//!
//! Hidden trees are skipped by both renderers.

use std::fmt::Write;

use serde::Serialize;

use crate::document_set::DEFAULT_SUFFIX;
use crate::nav::{NavNode, TocTree};
use crate::reference::relative_href;

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Render navigation as an indented bullet outline.
///
/// ```text
/// About
///   - Introduction
///     - History
///   - Glossary
/// ```
#[must_use]
pub fn render_text(trees: &[TocTree]) -> String {
    let mut sections = Vec::new();
    for tree in trees.iter().filter(|t| !t.hidden) {
        let mut out = String::new();
        let indent = if let Some(caption) = &tree.caption {
            let _ = writeln!(out, "{caption}");
            1
        } else {
            0
        };
        for node in &tree.nodes {
            text_node(&mut out, node, indent);
        }
        sections.push(out);
    }
    sections.join("\n")
}

fn text_node(out: &mut String, node: &NavNode, level: usize) {
    let _ = write!(out, "{}- {}{}", "  ".repeat(level), number_prefix(node), node.title);
    if node.external {
        let _ = write!(out, " <{}>", node.id);
    }
    out.push('\n');
    for child in &node.children {
        text_node(out, child, level + 1);
    }
}

/// Render navigation as Sphinx-style toctree HTML.
///
/// Links are relative to the page of `current_id`; a trailing `.rst` on an
/// identifier is dropped from its link.
#[must_use]
pub fn render_html(trees: &[TocTree], current_id: &str) -> String {
    render_html_with_suffixes(trees, current_id, &[DEFAULT_SUFFIX])
}

/// Like [`render_html`], dropping any of `suffixes` from linked identifiers.
#[must_use]
pub fn render_html_with_suffixes<S: AsRef<str>>(
    trees: &[TocTree],
    current_id: &str,
    suffixes: &[S],
) -> String {
    let mut out = String::new();
    for tree in trees.iter().filter(|t| !t.hidden) {
        out.push_str(r#"<div class="toctree-wrapper compound">"#);
        out.push('\n');
        if let Some(caption) = &tree.caption {
            let _ = writeln!(
                out,
                r#"<p class="caption" role="heading"><span class="caption-text">{}</span></p>"#,
                escape_html(caption)
            );
        }
        html_list(&mut out, &tree.nodes, current_id, suffixes, 1);
        out.push_str("</div>\n");
    }
    out
}

fn html_list<S: AsRef<str>>(
    out: &mut String,
    nodes: &[NavNode],
    current_id: &str,
    suffixes: &[S],
    level: usize,
) {
    if nodes.is_empty() {
        return;
    }
    out.push_str("<ul>\n");
    for node in nodes {
        let (class, href) = if node.external {
            ("reference external", node.id.clone())
        } else {
            ("reference internal", relative_href(current_id, &node.id, suffixes))
        };
        let _ = write!(
            out,
            r#"<li class="toctree-l{level}"><a class="{class}" href="{}">{}{}</a>"#,
            escape_html(&href),
            number_prefix(node),
            escape_html(&node.title)
        );
        if !node.children.is_empty() {
            out.push('\n');
            html_list(out, &node.children, current_id, suffixes, level + 1);
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
}

/// Section number followed by a space, or nothing when unnumbered.
fn number_prefix(node: &NavNode) -> String {
    if node.number.is_empty() {
        String::new()
    } else {
        format!("{} ", node.number_label())
    }
}

/// A document rendered for output: title, body text and navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    /// Document identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Body text with toctree blocks removed.
    pub body: String,
    /// Resolved toctrees, hidden ones included.
    pub navigation: Vec<TocTree>,
}

impl RenderedPage {
    /// Render as plain text: underlined title, body, navigation outline.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n{}\n", self.title, "=".repeat(self.title.chars().count()));
        if !self.body.is_empty() {
            let _ = write!(out, "\n{}\n", self.body);
        }
        let nav = render_text(&self.navigation);
        if !nav.is_empty() {
            let _ = write!(out, "\n{nav}");
        }
        out
    }

    /// Render as an HTML fragment.
    ///
    /// Body paragraphs (separated by blank lines) become `<p>` elements.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.to_html_with_suffixes(&[DEFAULT_SUFFIX])
    }

    /// Like [`RenderedPage::to_html`], dropping any of `suffixes` from links.
    #[must_use]
    pub fn to_html_with_suffixes<S: AsRef<str>>(&self, suffixes: &[S]) -> String {
        let mut out = format!("<h1>{}</h1>\n", escape_html(&self.title));
        for paragraph in self.body.split("\n\n").filter(|p| !p.trim().is_empty()) {
            let _ = writeln!(out, "<p>{}</p>", escape_html(paragraph));
        }
        out.push_str(&render_html_with_suffixes(
            &self.navigation,
            &self.id,
            suffixes,
        ));
        out
    }
}
