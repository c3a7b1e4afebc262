//! Import path extractor: finds the stylesheet specifier bound to a local
//! identifier in source text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Stylesheet extensions an import must end with to be considered.
pub const STYLESHEET_EXTENSIONS: [&str; 5] = ["styl", "sass", "scss", "less", "css"];

/// Build the import pattern for `identifier`.
///
/// Matches `identifier from "path"` and `identifier = require("path")`
/// (optionally `require<any>(`), where the quoted path ends in one of
/// [`STYLESHEET_EXTENSIONS`]. Group 1 is the identifier, group 2 the path.
pub fn import_regex(identifier: &str) -> Option<Regex> {
    Regex::new(&import_pattern(&regex::escape(identifier))).ok()
}

static ANY_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&import_pattern(r"\S+")).expect("import pattern is valid")
});

/// The import pattern with any non-whitespace identifier.
pub fn any_import_regex() -> &'static Regex {
    &ANY_IMPORT_RE
}

fn import_pattern(identifier_pattern: &str) -> String {
    format!(
        r#"\b({identifier_pattern})\s+(?:from\s+|=\s+require(?:<any>)?\()["'](.+\.(?:{exts}))["']\)?"#,
        exts = STYLESHEET_EXTENSIONS.join("|"),
    )
}

/// The raw (unresolved) specifier `identifier` is imported from, if any.
pub fn find_raw_specifier(text: &str, identifier: &str) -> Option<String> {
    let re = import_regex(identifier)?;
    let caps = re.captures(text)?;
    caps.get(2).map(|m| m.as_str().to_string())
}

/// `./x` and `../x` are resolved against the importing file's directory;
/// everything else goes through alias resolution.
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../")
}
