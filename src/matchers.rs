//! Match drivers: parse two flat strings and produce a verdict.
//!
//! These are the orchestration entry points for scoring. They never raise:
//! a string that fails to parse, or a resolution that fails on a malformed
//! catalog value, makes the pair a non-match.

use tracing::{debug, instrument};

use crate::resolver::EntityResolver;
use crate::tree::{CanonicalTree, SemanticTree, SurfaceTree};

/// Which grammar a pair of flat strings is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Surface,
    Canonical,
}

fn parse_if_possible<T: SemanticTree>(flat_string: &str) -> Option<T> {
    match T::parse(flat_string) {
        Ok(tree) => Some(tree),
        Err(e) => {
            debug!(error = %e, input = flat_string, "flat string rejected");
            None
        }
    }
}

fn match_strings<T: SemanticTree>(string_1: &str, string_2: &str) -> bool {
    match (parse_if_possible::<T>(string_1), parse_if_possible::<T>(string_2)) {
        (Some(tree_1), Some(tree_2)) => tree_1.unordered_match(&tree_2),
        _ => false,
    }
}

/// Whether two flat strings of the given dialect parse and match, ignoring
/// child order.
#[instrument(level = "debug")]
pub fn is_unordered_exact_match(string_1: &str, string_2: &str, dialect: Dialect) -> bool {
    match dialect {
        Dialect::Surface => match_strings::<SurfaceTree>(string_1, string_2),
        Dialect::Canonical => match_strings::<CanonicalTree>(string_1, string_2),
    }
}

/// Surface-dialect match after dropping non-semantic nodes from both sides.
#[instrument(level = "debug")]
pub fn is_semantics_only_unordered_exact_match(string_1: &str, string_2: &str) -> bool {
    let Some(tree_1) = parse_if_possible::<SurfaceTree>(string_1) else {
        return false;
    };
    let Some(tree_2) = parse_if_possible::<SurfaceTree>(string_2) else {
        return false;
    };
    tree_1
        .semantics_only()
        .unordered_match(&tree_2.semantics_only())
}

/// Canonical-dialect match where `string_1` goes through entity resolution
/// and default injection before comparison; `string_2` is the reference and
/// is compared as-is.
#[instrument(level = "debug", skip(resolver))]
pub fn is_unordered_exact_match_post_resolution(
    string_1: &str,
    string_2: &str,
    resolver: &impl EntityResolver,
) -> bool {
    let Some(tree_1) = parse_if_possible::<CanonicalTree>(string_1) else {
        return false;
    };
    let Some(tree_2) = parse_if_possible::<CanonicalTree>(string_2) else {
        return false;
    };
    match resolver.resolve(&tree_1) {
        Ok(resolved) => resolved.unordered_match(&tree_2),
        Err(e) => {
            debug!(error = %e, input = string_1, "resolution failed");
            false
        }
    }
}

/// Match where `string_1` is a surface annotation (filtered to its semantic
/// skeleton, then resolved) and `string_2` a canonical reference.
#[instrument(level = "debug", skip(resolver))]
pub fn is_semantics_only_unordered_exact_match_post_resolution(
    string_1: &str,
    string_2: &str,
    resolver: &impl EntityResolver,
) -> bool {
    let Some(tree_1) = parse_if_possible::<SurfaceTree>(string_1) else {
        return false;
    };
    let Some(tree_2) = parse_if_possible::<CanonicalTree>(string_2) else {
        return false;
    };
    let skeleton = tree_1.semantics_only().into_canonical();
    match resolver.resolve(&skeleton) {
        Ok(resolved) => resolved.unordered_match(&tree_2),
        Err(e) => {
            debug!(error = %e, input = string_1, "resolution failed");
            false
        }
    }
}
