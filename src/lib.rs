//! CSS Modules classname indexing and import alias resolution for editor
//! tooling.
//!
//! The work is split across the workspace crates; this crate re-exports
//! them under one roof for hosts embedding the providers.

// Shared position and text types
pub use cssm_common as common;
pub use cssm_common::{Location, Position, Range, SourcePosition};

// Stylesheet parser (CSS, SCSS, LESS, SASS)
pub use cssm_stylesheet as stylesheet;
pub use cssm_stylesheet::{ParseError, Stylesheet, StylesheetSyntax, parse_stylesheet};

// Classname dictionary
pub use cssm_index as index;
pub use cssm_index::{
    CamelCaseOption, ClassnameEntry, ClassnameIndex, all_class_names, build_index,
    get_transformer, index_source, lookup,
};

// Import specifier and tsconfig/jsconfig alias resolution
pub use cssm_resolver as resolver;
pub use cssm_resolver::{AliasConfig, resolve_aliased_import, resolve_import};

// Completion, definition and hover
pub use cssm_lsp as lsp;
pub use cssm_lsp::{CompletionItem, CompletionProvider, DefinitionProvider, HoverInfo, ProviderSettings};

// Tracing setup for hosts (CSSM_LOG / CSSM_LOG_FORMAT)
pub mod tracing_config;
