//! Flat-string parsers for the two annotation dialects.
//!
//! Both grammars are parenthesized prefix notation, `( LABEL child child .. )`,
//! but they tokenize differently. The surface dialect splits on whitespace and
//! treats `(LABEL` as a single opening token. The canonical dialect splits on
//! every non-word character, so parentheses are always standalone tokens.

use std::collections::HashMap;

use regex::Regex;
use tracing::instrument;

use crate::errors::{ParseError, ParseResult};
use crate::node::Node;

/// Synthetic root label both parsers seed their tree with.
pub const ROOT_SYMBOL: &str = "DUMMY-ROOT";

/// Parses a surface-dialect flat string, e.g.
/// `(ORDER can i have (PIZZAORDER (SIZE large ) (TOPPING bbq pulled pork ) ) please )`.
///
/// Maintains a stack of open nodes seeded with the synthetic root: a token
/// with a leading `(` opens a node, a solitary `)` closes the innermost open
/// node, anything else becomes a terminal child of the innermost open node.
#[instrument(level = "trace")]
pub fn parse_surface(flat_string: &str) -> ParseResult<Node> {
    let mut stack: Vec<Node> = vec![Node::leaf(ROOT_SYMBOL)];

    for token in flat_string.split_whitespace() {
        if token.contains('(') {
            stack.push(Node::leaf(token.trim_start_matches('(')));
        } else if token == ")" {
            let node = stack.pop().ok_or(ParseError::UnbalancedParentheses)?;
            if node.children.is_empty() {
                return Err(ParseError::EmptyNonTerminal { label: node.label });
            }
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                // the synthetic root itself was closed
                None => return Err(ParseError::UnbalancedParentheses),
            }
        } else {
            match stack.last_mut() {
                Some(parent) => parent.children.push(Node::leaf(token)),
                None => return Err(ParseError::UnbalancedParentheses),
            }
        }
    }

    if stack.len() > 1 {
        return Err(ParseError::MalformedRoot {
            open_nodes: stack.len() - 1,
        });
    }
    stack.pop().ok_or(ParseError::UnbalancedParentheses)
}

/// Parses a canonical-dialect flat string, e.g.
/// `(ORDER (PIZZAORDER (NUMBER 1) (TOPPING HAM)))`.
///
/// The input is wrapped under the synthetic root, tokenized, and materialized
/// in two passes: one linear scan builds the open-to-close bracket index map,
/// then the recursive builder walks token spans without ever re-scanning for
/// a matching bracket.
#[instrument(level = "trace")]
pub fn parse_canonical(flat_string: &str) -> ParseResult<Node> {
    let wrapped = format!("({ROOT_SYMBOL} {flat_string})");
    let tokens = tokenize_canonical(&wrapped);
    let spans = bracket_spans(&tokens)?;
    // The synthetic root must close on the final token. A stray `)` in the
    // input closes the root early and would leave a silently dropped suffix,
    // even though a stray `(` later keeps the token stream balanced overall.
    if spans.get(&0).copied() != Some(tokens.len() - 1) {
        return Err(ParseError::UnbalancedParentheses);
    }
    build_node(&tokens, 0, &spans)
}

/// Splits a canonical-dialect string on every character outside
/// `[a-zA-Z0-9._-]`, keeping the separators as tokens and discarding
/// whitespace and commas.
pub fn tokenize_canonical(flat_string: &str) -> Vec<String> {
    let separator = Regex::new(r"[^a-zA-Z0-9._-]").unwrap();

    let mut tokens = Vec::new();
    let mut last = 0;
    for m in separator.find_iter(flat_string) {
        if m.start() > last {
            tokens.push(flat_string[last..m.start()].to_string());
        }
        tokens.push(m.as_str().to_string());
        last = m.end();
    }
    if last < flat_string.len() {
        tokens.push(flat_string[last..].to_string());
    }

    tokens.retain(|t| !t.trim().is_empty() && t.as_str() != ",");
    tokens
}

/// Maps the index of every `(` token to the index of its matching `)`.
fn bracket_spans(tokens: &[String]) -> ParseResult<HashMap<usize, usize>> {
    let mut stack = Vec::new();
    let mut spans = HashMap::new();

    for (i, token) in tokens.iter().enumerate() {
        match token.as_str() {
            "(" => stack.push(i),
            ")" => {
                let open = stack.pop().ok_or(ParseError::UnbalancedParentheses)?;
                spans.insert(open, i);
            }
            _ => {}
        }
    }
    if !stack.is_empty() {
        return Err(ParseError::UnbalancedParentheses);
    }
    Ok(spans)
}

/// Recursively materializes the node starting at `start`: a bare token is a
/// terminal, a `(` token begins a node labeled by the following token whose
/// children occupy the remaining span up to the matching `)`.
fn build_node(
    tokens: &[String],
    start: usize,
    spans: &HashMap<usize, usize>,
) -> ParseResult<Node> {
    let first = tokens.get(start).ok_or(ParseError::UnbalancedParentheses)?;
    if first.as_str() != "(" {
        return Ok(Node::leaf(first));
    }

    let close = *spans.get(&start).ok_or(ParseError::UnbalancedParentheses)?;
    let label = tokens
        .get(start + 1)
        .ok_or(ParseError::UnbalancedParentheses)?;

    let mut children = Vec::new();
    let mut i = start + 2;
    while i < close {
        children.push(build_node(tokens, i, spans)?);
        i = if tokens[i] == "(" {
            *spans.get(&i).ok_or(ParseError::UnbalancedParentheses)? + 1
        } else {
            i + 1
        };
    }
    Ok(Node::with_children(label, children))
}
