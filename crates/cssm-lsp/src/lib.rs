//! Editor features for CSS Modules references.
//!
//! This crate composes import resolution and classname indexing into:
//! - Completion of class names after `styles.`
//! - Go to definition of `styles.className` and of import paths
//! - Hover showing the defining rule as CSS
//!
//! Requests are plain function calls on document text; the protocol
//! transport and document synchronization live in the host.

pub mod completions;
pub use completions::{CompletionItem, CompletionItemKind, CompletionProvider, InsertReplaceEdit};

pub mod definition;
pub use definition::{DefinitionProvider, get_position};

pub mod hover;
pub use hover::{HoverInfo, MarkedString, stringify_classname};

pub mod settings;
pub use settings::ProviderSettings;

pub mod words;
pub use words::{get_words, is_import_line_match, trailing_member_expression};
