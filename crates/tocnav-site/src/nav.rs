//! Resolved navigation tree types.

use serde::Serialize;

/// Navigation node for one resolved toctree entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavNode {
    /// Document identifier, or the URL for external entries.
    pub id: String,
    /// Display title.
    pub title: String,
    /// True for links outside the document set.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
    /// Section number (e.g. `[2, 1]` for "2.1") in numbered trees.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub number: Vec<usize>,
    /// Child navigation nodes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavNode>,
}

impl NavNode {
    /// Node for a document in the set.
    #[must_use]
    pub fn document(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            external: false,
            number: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Node for an external URL.
    #[must_use]
    pub fn external(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            external: true,
            ..Self::document(url, title)
        }
    }

    /// Attach child nodes.
    #[must_use]
    pub fn with_children(mut self, children: Vec<NavNode>) -> Self {
        self.children = children;
        self
    }

    /// Dotted section number ("2.1."), empty when unnumbered.
    #[must_use]
    pub fn number_label(&self) -> String {
        self.number.iter().map(|n| format!("{n}.")).collect()
    }

    /// Depth of the subtree rooted at this node (1 for a leaf).
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(NavNode::depth).max().unwrap_or(0)
    }
}

/// One resolved toctree block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TocTree {
    /// Caption shown above the tree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Target name from the `:name:` option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Depth limit the tree was resolved with (`None` = unlimited).
    pub maxdepth: Option<usize>,
    /// Resolved but not shown in rendered navigation.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    /// Top-level nodes.
    pub nodes: Vec<NavNode>,
}

/// Assign hierarchical section numbers down to `max_depth` levels.
///
/// External links are skipped and do not consume a number.
pub(crate) fn assign_numbers(nodes: &mut [NavNode], prefix: &[usize], max_depth: usize) {
    if prefix.len() >= max_depth {
        return;
    }
    let mut counter = 0;
    for node in nodes.iter_mut().filter(|n| !n.external) {
        counter += 1;
        let mut number = prefix.to_vec();
        number.push(counter);
        assign_numbers(&mut node.children, &number, max_depth);
        node.number = number;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_depth() {
        let node = NavNode::document("a", "A").with_children(vec![
            NavNode::document("b", "B"),
            NavNode::document("c", "C").with_children(vec![NavNode::document("d", "D")]),
        ]);
        assert_eq!(node.depth(), 3);
        assert_eq!(NavNode::document("x", "X").depth(), 1);
    }

    #[test]
    fn test_assign_numbers() {
        let mut nodes = vec![
            NavNode::document("a", "A").with_children(vec![NavNode::document("a1", "A1")]),
            NavNode::external("https://example.com", "Site"),
            NavNode::document("b", "B"),
        ];

        assign_numbers(&mut nodes, &[], 999);

        assert_eq!(nodes[0].number, vec![1]);
        assert_eq!(nodes[0].children[0].number, vec![1, 1]);
        assert!(nodes[1].number.is_empty());
        assert_eq!(nodes[2].number, vec![2]);
        assert_eq!(nodes[0].children[0].number_label(), "1.1.");
    }

    #[test]
    fn test_assign_numbers_depth_limited() {
        let mut nodes =
            vec![NavNode::document("a", "A").with_children(vec![NavNode::document("a1", "A1")])];

        assign_numbers(&mut nodes, &[], 1);

        assert_eq!(nodes[0].number, vec![1]);
        assert!(nodes[0].children[0].number.is_empty());
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let node = NavNode::document("about/intro", "Introduction");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "about/intro", "title": "Introduction"})
        );

        let external = NavNode::external("https://example.com", "Example");
        let json = serde_json::to_value(&external).unwrap();
        assert_eq!(json["external"], serde_json::json!(true));
    }
}
