//! The two semantic-tree dialects.
//!
//! [`SurfaceTree`] holds a parse of the free-form annotation dialect, which
//! may carry connective tokens like "can i have". [`CanonicalTree`] holds a
//! parse of the normalized target dialect. Shared behavior lives on the
//! [`SemanticTree`] trait; comparing trees of different dialects is a type
//! error rather than a runtime check.

use crate::errors::ParseResult;
use crate::node::Node;
use crate::parser;

/// Common surface of both dialects.
///
/// Implementors supply their own parser; navigation, rendering and matching
/// are shared and operate on the underlying [`Node`] structure.
pub trait SemanticTree: Sized {
    /// Wraps an already-built node as a tree of this dialect.
    fn from_node(node: Node) -> Self;

    fn node(&self) -> &Node;

    /// Parses a flat string with this dialect's grammar.
    fn parse(flat_string: &str) -> ParseResult<Self>;

    fn root_label(&self) -> &str {
        &self.node().label
    }

    fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    /// The ordered direct subtrees, each wrapped in the same dialect.
    fn children(&self) -> Vec<Self> {
        self.node()
            .children
            .iter()
            .cloned()
            .map(Self::from_node)
            .collect()
    }

    /// Builds a tree from a root label and already-built child trees.
    fn from_parts(root_label: impl Into<String>, children: Vec<Self>) -> Self {
        let child_nodes = children.into_iter().map(|c| c.into_node()).collect();
        Self::from_node(Node::with_children(root_label, child_nodes))
    }

    fn into_node(self) -> Node;

    fn render(&self) -> String {
        self.node().render()
    }

    /// Order-insensitive structural equality between trees of the same
    /// dialect. See [`Node::unordered_match`] for the pairing strategy and
    /// its greedy limitation.
    fn unordered_match(&self, other: &Self) -> bool {
        self.node().unordered_match(other.node())
    }
}

/// Tree parsed from the free-form annotation dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceTree {
    root: Node,
}

impl SemanticTree for SurfaceTree {
    fn from_node(node: Node) -> Self {
        Self { root: node }
    }

    fn node(&self) -> &Node {
        &self.root
    }

    fn into_node(self) -> Node {
        self.root
    }

    fn parse(flat_string: &str) -> ParseResult<Self> {
        parser::parse_surface(flat_string).map(Self::from_node)
    }
}

impl SurfaceTree {
    /// Returns a new tree keeping only the semantic skeleton: a node whose
    /// children are all terminal keeps them, any other node keeps only its
    /// recursively filtered non-terminal children. Connective surface tokens
    /// under mixed nodes are dropped.
    pub fn semantics_only(&self) -> SurfaceTree {
        Self::from_node(semantic_skeleton(&self.root))
    }

    /// Re-labels this tree as canonical. Used after filtering and entity
    /// resolution, when the surface structure has been rewritten into the
    /// target vocabulary and must be compared against canonical references.
    pub fn into_canonical(self) -> CanonicalTree {
        CanonicalTree::from_node(self.root)
    }
}

fn semantic_skeleton(node: &Node) -> Node {
    if node.children.iter().all(Node::is_leaf) {
        let children = node.children.iter().map(|c| Node::leaf(&c.label)).collect();
        return Node::with_children(&node.label, children);
    }

    let children = node
        .children
        .iter()
        .filter(|c| !c.is_leaf())
        .map(semantic_skeleton)
        .collect();
    Node::with_children(&node.label, children)
}

/// Tree parsed from the normalized target dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalTree {
    root: Node,
}

impl SemanticTree for CanonicalTree {
    fn from_node(node: Node) -> Self {
        Self { root: node }
    }

    fn node(&self) -> &Node {
        &self.root
    }

    fn into_node(self) -> Node {
        self.root
    }

    fn parse(flat_string: &str) -> ParseResult<Self> {
        parser::parse_canonical(flat_string).map(Self::from_node)
    }
}
