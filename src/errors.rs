use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a tree from a flat annotation string.
///
/// Parsing is all-or-nothing: any of these aborts construction of the tree,
/// nothing is repaired.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unbalanced parentheses in flat string")]
    UnbalancedParentheses,

    #[error("semantic node '{label}' closed with no children")]
    EmptyNonTerminal { label: String },

    #[error("malformed flat string: {open_nodes} semantic nodes left unclosed")]
    MalformedRoot { open_nodes: usize },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised while loading catalog files.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("malformed catalog line in {path}: '{line}'")]
    MalformedLine { path: PathBuf, line: String },
}

pub type CatalogResult<T> = Result<T, CatalogError>;
