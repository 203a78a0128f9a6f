//! Entity resolution: rewriting raw token spans into canonical entities.
//!
//! A resolver walks a tree looking for nodes whose children are all terminal.
//! When such a node's label has a catalog table, the children's labels joined
//! with spaces form the lookup key; the key's order is exactly the order the
//! parser appended the children in, which is why no transform in this crate
//! ever reorders children before resolution.

use std::path::Path;

use itertools::Itertools;
use tracing::instrument;

use crate::catalog::{self, Catalogs};
use crate::errors::{CatalogResult, ParseError, ParseResult};
use crate::node::Node;
use crate::parser;
use crate::tree::{CanonicalTree, SemanticTree};

/// Leaf inserted when a node's label has a catalog table but the token span
/// is not in it. Distinct from a label with no table at all, which passes
/// through untouched.
pub const UNKNOWN_ENTITY: &str = "<UNKNOWN_ENTITY>";

/// Resolves raw token spans against catalog tables and applies the domain's
/// default-subtree conventions.
pub trait EntityResolver {
    fn catalogs(&self) -> &Catalogs;

    /// Returns a new tree with every resolvable terminal group replaced by
    /// its canonical subtree, or by a single [`UNKNOWN_ENTITY`] leaf when the
    /// label is an entity type but the span is not in its table.
    fn resolve_entities(&self, tree: &CanonicalTree) -> ParseResult<CanonicalTree> {
        resolve_node(self.catalogs(), tree.node()).map(CanonicalTree::from_node)
    }

    /// Domain-specific pass injecting default subtrees where a convention
    /// requires one.
    fn add_defaults(&self, tree: &CanonicalTree) -> CanonicalTree;

    /// Full canonicalization: entity resolution, then default injection.
    fn resolve(&self, tree: &CanonicalTree) -> ParseResult<CanonicalTree> {
        let resolved = self.resolve_entities(tree)?;
        Ok(self.add_defaults(&resolved))
    }
}

#[instrument(level = "trace", skip(catalogs, node), fields(label = %node.label))]
fn resolve_node(catalogs: &Catalogs, node: &Node) -> ParseResult<Node> {
    if node.children.iter().all(Node::is_leaf) {
        let Some(table) = catalogs.table(&node.label) else {
            // Not an entity type (e.g. a free-text NAME field): the tokens
            // are kept verbatim.
            return Ok(node.clone());
        };

        let key = node.children.iter().map(|c| c.label.as_str()).join(" ");
        return match table.get(&key) {
            Some(prefix_value) => {
                let bracket = catalog::to_bracket_notation(prefix_value);
                let parsed = parser::parse_canonical(&bracket)?;
                parsed
                    .children
                    .into_iter()
                    .next()
                    .ok_or(ParseError::UnbalancedParentheses)
            }
            None => Ok(Node::with_children(
                &node.label,
                vec![Node::leaf(UNKNOWN_ENTITY)],
            )),
        };
    }

    // Mixed node: terminal children are never part of an entity span here,
    // only the non-terminal children go through resolution.
    let children = node
        .children
        .iter()
        .map(|child| {
            if child.is_leaf() {
                Ok(child.clone())
            } else {
                resolve_node(catalogs, child)
            }
        })
        .collect::<ParseResult<Vec<_>>>()?;
    Ok(Node::with_children(&node.label, children))
}

/// Resolver for the pizza/drink ordering domain.
pub struct PizzaResolver {
    catalogs: Catalogs,
}

/// Labels of order nodes that must carry an explicit quantity.
const ORDER_LABELS: &[&str] = &["PIZZAORDER", "DRINKORDER"];

/// Catalog files the pizza domain ships, keyed by the entity label they
/// resolve.
const CATALOG_FILES: &[(&str, &str)] = &[
    ("TOPPING", "topping.txt"),
    ("NUMBER", "number.txt"),
    ("SIZE", "size.txt"),
    ("STYLE", "style.txt"),
    ("DRINKTYPE", "drinks.txt"),
    ("VOLUME", "drink_volume.txt"),
    ("CONTAINERTYPE", "container.txt"),
    ("QUANTITY", "quant_qualifier.txt"),
];

impl PizzaResolver {
    pub fn new(catalogs: Catalogs) -> Self {
        Self { catalogs }
    }

    /// Loads the standard catalog files from `dir` and builds a resolver.
    pub fn from_catalog_dir(dir: &Path) -> CatalogResult<Self> {
        let mut catalogs = Catalogs::new();
        for (label, file_name) in CATALOG_FILES {
            let table = catalog::load_catalog_file(&dir.join(file_name))?;
            catalogs.insert_table(*label, table);
        }
        Ok(Self::new(catalogs))
    }
}

impl EntityResolver for PizzaResolver {
    fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Appends a `(NUMBER 1 )` subtree to every `PIZZAORDER` or `DRINKORDER`
    /// node without a direct `NUMBER` child. The canonical format requires an
    /// explicit quantity on every order, but a surface annotation like
    /// "get me a pie with ham" carries none.
    fn add_defaults(&self, tree: &CanonicalTree) -> CanonicalTree {
        CanonicalTree::from_node(defaults_node(tree.node()))
    }
}

fn defaults_node(node: &Node) -> Node {
    if node.is_leaf() {
        return node.clone();
    }

    if ORDER_LABELS.contains(&node.label.as_str())
        && node.children.iter().all(|c| c.label != "NUMBER")
    {
        let mut children = node.children.clone();
        children.push(Node::with_children("NUMBER", vec![Node::leaf("1")]));
        return Node::with_children(&node.label, children);
    }

    Node::with_children(
        &node.label,
        node.children.iter().map(defaults_node).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_resolver() -> PizzaResolver {
        let mut catalogs = Catalogs::new();

        let mut toppings = HashMap::new();
        toppings.insert("green peppers".to_string(), "TOPPING(GREEN_PEPPERS)".to_string());
        toppings.insert("ham".to_string(), "TOPPING(HAM)".to_string());
        catalogs.insert_table("TOPPING", toppings);

        let mut sizes = HashMap::new();
        sizes.insert("large".to_string(), "SIZE(LARGE)".to_string());
        sizes.insert("extra large size".to_string(), "SIZE(EXTRA_LARGE)".to_string());
        catalogs.insert_table("SIZE", sizes);

        let mut volumes = HashMap::new();
        volumes.insert("two liters".to_string(), "VOLUME(2,LITER)".to_string());
        catalogs.insert_table("VOLUME", volumes);

        PizzaResolver::new(catalogs)
    }

    fn resolve_str(input: &str) -> CanonicalTree {
        let tree = CanonicalTree::parse(input).unwrap();
        test_resolver().resolve_entities(&tree).unwrap()
    }

    #[test]
    fn test_multi_token_entity_is_resolved() {
        let resolved = resolve_str("(PIZZAORDER (TOPPING green peppers) (SIZE large))");
        let expected =
            CanonicalTree::parse("(PIZZAORDER (TOPPING GREEN_PEPPERS) (SIZE LARGE))").unwrap();
        assert!(resolved.unordered_match(&expected));
    }

    #[test]
    fn test_unknown_span_becomes_sentinel_leaf() {
        let resolved = resolve_str("(PIZZAORDER (SIZE biggest size))");
        let order = &resolved.children()[0];
        let size = &order.children()[0];
        assert_eq!(size.root_label(), "SIZE");
        let leaves = size.node().leaf_labels();
        assert_eq!(leaves, vec![UNKNOWN_ENTITY]);
    }

    #[test]
    fn test_non_entity_label_passes_through() {
        let resolved = resolve_str("(PIZZAORDER (NAME mario special))");
        let order = &resolved.children()[0];
        let name = &order.children()[0];
        assert_eq!(name.node().leaf_labels(), vec!["mario", "special"]);
    }

    #[test]
    fn test_catalog_value_may_expand_to_subtree() {
        let resolved = resolve_str("(DRINKORDER (VOLUME two liters))");
        let expected = CanonicalTree::parse("(DRINKORDER (VOLUME 2 LITER))").unwrap();
        assert!(resolved.unordered_match(&expected));
    }

    #[test]
    fn test_terminal_children_of_mixed_nodes_are_untouched() {
        // "large" sits directly under PIZZAORDER next to a non-terminal, so
        // it is not an entity span even though SIZE has a catalog.
        let resolved = resolve_str("(PIZZAORDER large (TOPPING ham))");
        let order = &resolved.children()[0];
        assert_eq!(order.children()[0].root_label(), "large");
        let topping = &order.children()[1];
        assert_eq!(topping.node().leaf_labels(), vec!["HAM"]);
    }

    #[test]
    fn test_add_defaults_inserts_number_one() {
        let resolver = test_resolver();
        let tree = CanonicalTree::parse("(ORDER (PIZZAORDER (TOPPING HAM)))").unwrap();
        let with_defaults = resolver.add_defaults(&tree);
        let expected =
            CanonicalTree::parse("(ORDER (PIZZAORDER (TOPPING HAM) (NUMBER 1)))").unwrap();
        assert!(with_defaults.unordered_match(&expected));
    }

    #[test]
    fn test_add_defaults_respects_existing_number() {
        let resolver = test_resolver();
        let tree = CanonicalTree::parse("(PIZZAORDER (NUMBER 2) (TOPPING HAM))").unwrap();
        let with_defaults = resolver.add_defaults(&tree);
        assert!(with_defaults.unordered_match(&tree));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let resolver = test_resolver();
        let tree =
            CanonicalTree::parse("(ORDER (PIZZAORDER (TOPPING green peppers)))").unwrap();
        let first = resolver.resolve(&tree).unwrap();
        let second = resolver.resolve(&tree).unwrap();
        assert_eq!(first, second);
    }
}
