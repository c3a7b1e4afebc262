//! Stylesheet parser for the cssm crates.
//!
//! This crate turns stylesheet text into a generic node tree:
//! - `StylesheetSyntax` - closed dispatch over CSS / LESS / SCSS / SASS,
//!   chosen once from the file extension
//! - `Stylesheet` - arena of nodes (`root`, `rule`, `atrule`, `declaration`,
//!   `comment`) with parent links and 1-based source positions
//! - `parse_stylesheet` - brace-syntax parser for CSS, LESS and SCSS and
//!   indented-syntax parser for SASS
//!
//! The tree is read-only once built; consumers key their own per-node data by
//! [`NodeIndex`] instead of mutating nodes.

pub mod error;
pub use error::ParseError;

pub mod node;
pub use node::{
    AtRuleData, CommentData, DeclarationData, Node, NodeData, NodeIndex, NodeKind, RuleData,
    Stylesheet,
};

pub mod syntax;
pub use syntax::StylesheetSyntax;

mod scanner;

mod parser;
mod indented;

/// Parse `text` with the given syntax.
///
/// Brace syntaxes (CSS, LESS, SCSS) go through the block parser; SASS goes
/// through the indentation parser. Both produce the same node model.
pub fn parse_stylesheet(text: &str, syntax: StylesheetSyntax) -> Result<Stylesheet, ParseError> {
    let sheet = match syntax {
        StylesheetSyntax::Sass => indented::IndentedParser::new(text).parse()?,
        StylesheetSyntax::Css | StylesheetSyntax::Less | StylesheetSyntax::Scss => {
            parser::BlockParser::new(text, syntax).parse()?
        }
    };
    tracing::trace!(syntax = ?syntax, nodes = sheet.len(), "parsed stylesheet");
    Ok(sheet)
}
