//! Parsing, matching and entity resolution for bracketed semantic trees.
//!
//! Annotations in the pizza/drink-ordering domain come in two dialects: a
//! free-form surface dialect (`(ORDER can i have (PIZZAORDER (SIZE large ) ) )`)
//! and a normalized canonical dialect (`(ORDER (PIZZAORDER (SIZE LARGE) (NUMBER 1)))`).
//! This crate parses both, filters surface trees down to their semantic
//! skeleton, resolves raw token spans into canonical entities via catalog
//! tables, and scores pairs of annotations with order-insensitive structural
//! matching.

pub mod catalog;
pub mod errors;
pub mod matchers;
pub mod node;
pub mod parser;
pub mod resolver;
pub mod tree;

pub use catalog::{load_catalog_file, to_bracket_notation, Catalogs};
pub use errors::{CatalogError, CatalogResult, ParseError, ParseResult};
pub use matchers::{
    is_semantics_only_unordered_exact_match,
    is_semantics_only_unordered_exact_match_post_resolution, is_unordered_exact_match,
    is_unordered_exact_match_post_resolution, Dialect,
};
pub use node::Node;
pub use resolver::{EntityResolver, PizzaResolver, UNKNOWN_ENTITY};
pub use tree::{CanonicalTree, SemanticTree, SurfaceTree};
