//! Toctree resolution.
//!
//! Turns the toctree blocks of a document into [`TocTree`]s by looking each
//! entry up in a [`DocumentSet`], expanding glob patterns, and recursing into
//! the toctrees of every referenced document until the depth limit of the
//! top-level block is reached.

use glob::{MatchOptions, Pattern};
use tocnav_rst::{Document, EntryTarget, ToctreeBlock};

use crate::document_set::DocumentSet;
use crate::error::BrokenReferenceError;
use crate::nav::{NavNode, TocTree, assign_numbers};
use crate::reference::join_reference;

/// `*` and `?` stay within one path segment; `**` crosses directories.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Extra option that keeps hidden sub-trees in the navigation.
const INCLUDE_HIDDEN: &str = "includehidden";

/// Limits set by the top-level block, applied to the whole tree.
#[derive(Clone, Copy)]
struct Limits {
    maxdepth: Option<usize>,
    include_hidden: bool,
}

/// Resolves toctree entries against a document set.
pub struct Resolver<'a> {
    set: &'a DocumentSet,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over `set`.
    #[must_use]
    pub fn new(set: &'a DocumentSet) -> Self {
        Self { set }
    }

    /// Resolve every toctree block of `doc`, one [`TocTree`] per block.
    ///
    /// # Errors
    ///
    /// Returns [`BrokenReferenceError`] for the first non-glob entry, in
    /// `doc` or in any document reached through it, that names a missing
    /// document.
    pub fn resolve(&self, doc: &Document) -> Result<Vec<TocTree>, BrokenReferenceError> {
        let mut ancestors = vec![doc.id.as_str()];
        doc.toctrees
            .iter()
            .map(|block| self.resolve_tree(doc, block, &mut ancestors))
            .collect()
    }

    /// Every non-glob entry of `doc` that names a missing document.
    ///
    /// Only the document's own blocks are inspected.
    #[must_use]
    pub fn broken_references(&self, doc: &Document) -> Vec<BrokenReferenceError> {
        doc.toctrees
            .iter()
            .flat_map(|block| &block.entries)
            .filter_map(|entry| match &entry.target {
                EntryTarget::Document(reference) if self.lookup(doc, reference).is_none() => {
                    Some(BrokenReferenceError {
                        missing: reference.clone(),
                        referenced_from: doc.id.clone(),
                        line: entry.line,
                    })
                }
                _ => None,
            })
            .collect()
    }

    /// Identifiers `doc` links to directly, including glob matches.
    ///
    /// Missing references are left out.
    #[must_use]
    pub fn referenced_ids(&self, doc: &Document) -> Vec<&'a str> {
        let mut ids = Vec::new();
        for entry in doc.toctrees.iter().flat_map(|block| &block.entries) {
            match &entry.target {
                EntryTarget::Document(reference) => {
                    if let Some(target) = self.lookup(doc, reference) {
                        ids.push(target.id.as_str());
                    }
                }
                EntryTarget::Pattern(pattern) => {
                    ids.extend(
                        self.glob_matches(doc, pattern, entry.line)
                            .into_iter()
                            .map(|target| target.id.as_str()),
                    );
                }
                EntryTarget::SelfRef | EntryTarget::External(_) => {}
            }
        }
        ids
    }

    fn resolve_tree<'b>(
        &'b self,
        doc: &'b Document,
        block: &'b ToctreeBlock,
        ancestors: &mut Vec<&'b str>,
    ) -> Result<TocTree, BrokenReferenceError> {
        let options = &block.options;
        let limits = Limits {
            maxdepth: options.maxdepth,
            include_hidden: options.extra.contains_key(INCLUDE_HIDDEN),
        };
        let mut nodes = self.resolve_entries(doc, block, limits, 1, ancestors)?;
        if let Some(depth) = options.numbered {
            assign_numbers(&mut nodes, &[], depth);
        }

        Ok(TocTree {
            caption: options.caption.clone(),
            name: options.name.clone(),
            maxdepth: options.maxdepth,
            hidden: options.hidden,
            nodes,
        })
    }

    fn resolve_entries<'b>(
        &'b self,
        doc: &'b Document,
        block: &'b ToctreeBlock,
        limits: Limits,
        level: usize,
        ancestors: &mut Vec<&'b str>,
    ) -> Result<Vec<NavNode>, BrokenReferenceError> {
        let mut nodes = Vec::new();

        for entry in &block.entries {
            match &entry.target {
                EntryTarget::SelfRef => {
                    let title = entry.title.clone().unwrap_or_else(|| display_title(doc));
                    nodes.push(NavNode::document(&doc.id, title));
                }
                EntryTarget::External(url) => {
                    let title = entry.title.clone().unwrap_or_else(|| url.clone());
                    nodes.push(NavNode::external(url, title));
                }
                EntryTarget::Pattern(pattern) => {
                    for target in self.glob_matches(doc, pattern, entry.line) {
                        if ancestors.contains(&target.id.as_str()) {
                            continue;
                        }
                        nodes.push(self.document_node(target, None, limits, level, ancestors)?);
                    }
                }
                EntryTarget::Document(reference) => {
                    let target =
                        self.lookup(doc, reference)
                            .ok_or_else(|| BrokenReferenceError {
                                missing: reference.clone(),
                                referenced_from: doc.id.clone(),
                                line: entry.line,
                            })?;
                    if ancestors.contains(&target.id.as_str()) {
                        tracing::warn!(
                            document = %doc.id,
                            line = entry.line,
                            reference = %reference,
                            "Circular toctree reference skipped"
                        );
                        continue;
                    }
                    let node = self.document_node(
                        target,
                        entry.title.as_deref(),
                        limits,
                        level,
                        ancestors,
                    )?;
                    nodes.push(node);
                }
            }
        }

        if block.options.reversed {
            nodes.reverse();
        }
        Ok(nodes)
    }

    /// Node for `target` with the entries of its own toctrees as children.
    ///
    /// Hidden blocks of `target` are still resolved, so their broken
    /// references fail the tree, but their entries are only kept when the
    /// top-level block has `:includehidden:`.
    fn document_node<'b>(
        &'b self,
        target: &'b Document,
        title: Option<&str>,
        limits: Limits,
        level: usize,
        ancestors: &mut Vec<&'b str>,
    ) -> Result<NavNode, BrokenReferenceError> {
        let title = title.map_or_else(|| display_title(target), str::to_owned);
        let mut node = NavNode::document(&target.id, title);

        if limits.maxdepth.is_none_or(|max| level < max) {
            ancestors.push(&target.id);
            let mut children = Vec::new();
            for block in &target.toctrees {
                let resolved = self.resolve_entries(target, block, limits, level + 1, ancestors);
                match resolved {
                    Ok(nodes) if !block.options.hidden || limits.include_hidden => {
                        children.extend(nodes);
                    }
                    Ok(_) => {}
                    Err(err) => {
                        ancestors.pop();
                        return Err(err);
                    }
                }
            }
            ancestors.pop();
            node.children = children;
        }

        Ok(node)
    }

    /// Look a reference up in the set.
    ///
    /// An identifier that exists as written wins. Otherwise the reference is
    /// tried relative to `doc`'s directory, then from the source root.
    fn lookup(&self, doc: &Document, reference: &str) -> Option<&'a Document> {
        if let Some(exact) = self.set.lookup(reference) {
            return Some(exact);
        }
        let relative = join_reference(doc.dir(), reference);
        self.set.lookup(&relative).or_else(|| {
            let rooted = join_reference("", reference);
            (rooted != relative)
                .then(|| self.set.lookup(&rooted))
                .flatten()
        })
    }

    /// Documents matching a glob entry, sorted, without `doc` itself.
    fn glob_matches(&self, doc: &Document, pattern: &str, line: usize) -> Vec<&'a Document> {
        let base = doc
            .dir()
            .split('/')
            .map(Pattern::escape)
            .collect::<Vec<_>>()
            .join("/");
        let full = join_reference(&base, pattern);
        let compiled = match Pattern::new(&full) {
            Ok(compiled) => compiled,
            Err(err) => {
                tracing::warn!(
                    document = %doc.id,
                    line,
                    pattern = %pattern,
                    error = %err,
                    "Invalid toctree glob pattern"
                );
                return Vec::new();
            }
        };

        let matches: Vec<&Document> = self
            .set
            .iter()
            .filter(|candidate| compiled.matches_with(&candidate.id, MATCH_OPTIONS))
            .collect();
        if matches.is_empty() {
            tracing::warn!(
                document = %doc.id,
                line,
                pattern = %pattern,
                "Toctree glob pattern matched no documents"
            );
        }

        matches
            .into_iter()
            .filter(|candidate| candidate.id != doc.id)
            .collect()
    }
}

/// Title shown for a document: its section title, or its identifier.
pub(crate) fn display_title(doc: &Document) -> String {
    doc.title.clone().unwrap_or_else(|| doc.id.clone())
}
