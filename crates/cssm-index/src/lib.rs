//! Classname indexing of CSS Modules stylesheets.
//!
//! - `selectors` - splitting, sanitizing, class token matching and `&`
//!   substitution
//! - `transform` - the `camelCase` setting and the transformers it selects
//! - `indexer` - the traversal that builds a [`ClassnameIndex`]
//!
//! [`build_index`] is the file-level entry point: read, pick the parser from
//! the extension, parse, index.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cssm_stylesheet::{StylesheetSyntax, parse_stylesheet};
use tracing::debug;

pub mod indexer;
pub use indexer::{ClassnameEntry, ClassnameIndex, index_stylesheet};

pub mod selectors;

pub mod transform;
pub use transform::{CamelCaseOption, StringTransformer, camel_case, dashes, get_transformer};

/// Parse `text` with `syntax` and index it.
pub fn index_source<F>(text: &str, syntax: StylesheetSyntax, transform: F) -> Result<ClassnameIndex>
where
    F: Fn(&str) -> String,
{
    let sheet = parse_stylesheet(text, syntax)?;
    Ok(index_stylesheet(&sheet, transform))
}

/// Read the stylesheet at `path` and build its classname index.
///
/// The parser is chosen from the extension (`.less`, `.scss`, `.sass`,
/// anything else is parsed as CSS). Read and parse failures are returned
/// with the file path attached.
pub fn build_index<F>(path: &Path, transform: F) -> Result<ClassnameIndex>
where
    F: Fn(&str) -> String,
{
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read stylesheet: {}", path.display()))?;
    let syntax = StylesheetSyntax::from_path(path);
    let sheet = parse_stylesheet(&text, syntax)
        .with_context(|| format!("failed to parse stylesheet: {}", path.display()))?;
    let index = index_stylesheet(&sheet, transform);
    debug!(
        path = %path.display(),
        syntax = ?syntax,
        classes = index.len(),
        "built classname index"
    );
    Ok(index)
}

/// Look up an already-transformed key (with its leading `.`).
pub fn lookup<'a>(index: &'a ClassnameIndex, transformed_name: &str) -> Option<&'a ClassnameEntry> {
    index.get(transformed_name)
}

/// Class names of the stylesheet at `path` without their leading `.`, in
/// order of definition, keeping only those containing `keyword` (all of them
/// when `keyword` is empty).
pub fn all_class_names<F>(path: &Path, keyword: &str, transform: F) -> Result<Vec<String>>
where
    F: Fn(&str) -> String,
{
    let index = build_index(path, transform)?;
    Ok(index
        .keys()
        .map(|key| key.strip_prefix('.').unwrap_or(key))
        .filter(|name| name.contains(keyword))
        .map(str::to_string)
        .collect())
}
