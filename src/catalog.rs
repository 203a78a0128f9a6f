//! Catalog tables mapping raw token spans to canonical entity subtrees.
//!
//! A catalog file is line-oriented and tab-separated: the left column is a
//! lowercase space-joined token sequence as it appears in annotations, the
//! right column the canonical value in compact prefix notation, e.g.
//! `extra large size\tSIZE(EXTRA_LARGE)`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, instrument};

use crate::errors::{CatalogError, CatalogResult};

/// Read-only lookup tables keyed by entity label.
///
/// Built once when a resolver is constructed; resolution only ever reads,
/// so a resolver can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    tables: HashMap<String, HashMap<String, String>>,
}

impl Catalogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_table(&mut self, label: impl Into<String>, table: HashMap<String, String>) {
        self.tables.insert(label.into(), table);
    }

    /// The lookup table for `label`, if that label is an entity type at all.
    pub fn table(&self, label: &str) -> Option<&HashMap<String, String>> {
        self.tables.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

impl From<HashMap<String, HashMap<String, String>>> for Catalogs {
    fn from(tables: HashMap<String, HashMap<String, String>>) -> Self {
        Self { tables }
    }
}

/// Converts a compact prefix value like `COMPLEX_TOPPING(TOPPING(HAM),QUANTITY(EXTRA))`
/// into the bracket notation the canonical parser accepts:
/// `(COMPLEX_TOPPING (TOPPING HAM ) (QUANTITY EXTRA ) )` with labels upper-cased.
pub fn to_bracket_notation(prefix: &str) -> String {
    let spaced = prefix
        .replace(')', " )")
        .replace('(', "( ")
        .replace(',', " ");

    let mut words = Vec::new();
    for word in spaced.split_whitespace() {
        match word.strip_suffix('(') {
            Some(label) => words.push(format!("({}", label.to_uppercase())),
            None => words.push(word.to_string()),
        }
    }
    words.join(" ")
}

/// Loads one catalog file into its lookup table. Empty lines are skipped; a
/// non-empty line without a tab separator is rejected.
#[instrument(level = "debug")]
pub fn load_catalog_file(path: &Path) -> CatalogResult<HashMap<String, String>> {
    let file = File::open(path).map_err(CatalogError::FileReadError)?;
    let reader = BufReader::new(file);

    let mut mapping = HashMap::new();
    for line in reader.lines() {
        let line = line.map_err(CatalogError::FileReadError)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (value, name) = line.split_once('\t').ok_or_else(|| CatalogError::MalformedLine {
            path: path.to_path_buf(),
            line: line.to_string(),
        })?;
        mapping.insert(value.trim().to_string(), name.trim().to_string());
    }
    debug!(entries = mapping.len(), path = %path.display(), "catalog loaded");
    Ok(mapping)
}
