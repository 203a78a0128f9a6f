//! Value-semantic tree nodes.
//!
//! Every node owns its children outright, so every transform in this crate
//! (semantics-only filtering, entity resolution, default insertion) builds a
//! fresh tree and can never alias a tree the caller still holds.

use termtree::Tree;
use tracing::instrument;

/// A labeled node with an ordered list of owned children.
///
/// A node with no children is terminal. Child order is the order the parser
/// appended them in; entity resolution relies on it for its lookup keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub label: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(label: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.depth())
            .max()
            .unwrap_or(0)
    }

    /// Collects the labels of all leaves, left to right.
    pub fn leaf_labels(&self) -> Vec<String> {
        if self.children.is_empty() {
            vec![self.label.clone()]
        } else {
            let mut leaves = Vec::new();
            for child in &self.children {
                leaves.extend(child.leaf_labels());
            }
            leaves
        }
    }

    /// Order-insensitive structural equality.
    ///
    /// Two nodes match iff their labels are equal, their child counts are
    /// equal, and every child of `self` can claim a distinct child of `other`
    /// that matches recursively. The pairing is greedy first-fit in child
    /// order, not an exhaustive bipartite search; an earlier claim is never
    /// revisited to unblock a later child.
    #[instrument(level = "trace", skip(self, other))]
    pub fn unordered_match(&self, other: &Node) -> bool {
        if self.label != other.label {
            return false;
        }
        if self.children.len() != other.children.len() {
            return false;
        }
        let mut claimed = vec![false; other.children.len()];
        for child in &self.children {
            let partner = other
                .children
                .iter()
                .enumerate()
                .find(|(j, candidate)| !claimed[*j] && child.unordered_match(candidate));
            match partner {
                Some((j, _)) => claimed[j] = true,
                None => return false,
            }
        }
        true
    }

    /// Indented multi-line rendering of the subtree rooted here.
    pub fn render(&self) -> String {
        self.to_tree_string().to_string()
    }
}

pub trait NodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl NodeConvert for Node {
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self.children.iter().map(|c| c.to_tree_string()).collect();
        Tree::new(self.label.clone()).with_leaves(leaves)
    }
}
