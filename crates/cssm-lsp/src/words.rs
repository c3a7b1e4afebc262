//! Extraction of `object.field` / `object['field']` references around a
//! caret, and hit-testing of import lines.

use cssm_common::{Position, utf16_len, utf16_to_byte_offset};
use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_MEMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[a-z0-9._]*$").expect("member pattern is valid"));
static LEADING_MEMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z0-9._]*").expect("member pattern is valid"));
static TRAILING_SUBSCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)[a-z0-9"'_\[\-]*$"#).expect("subscript pattern is valid"));
static LEADING_SUBSCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)^[a-z0-9_\-\['"]*"#).expect("subscript pattern is valid"));

/// Text of `line` before the caret.
fn head(line: &str, position: Position) -> &str {
    &line[..utf16_to_byte_offset(line, position.character)]
}

/// Byte offset where the trailing run matched by `re` starts in `text`.
fn trailing_run_start(re: &Regex, text: &str) -> usize {
    re.find(text).map(|m| m.start()).unwrap_or(text.len())
}

/// The `[a-z0-9._]` run ending at the caret, e.g. `styles.bt` in
/// `<div className={styles.bt|`.
pub fn trailing_member_expression(line: &str, position: Position) -> &str {
    let head = head(line, position);
    &head[trailing_run_start(&TRAILING_MEMBER_RE, head)..]
}

/// The `(object, field)` pair the caret is on.
///
/// Handles property access (`styles.myClass`, the whole identifier run
/// around the caret) and subscripts (`styles['my-class']`,
/// `styles["my-class"]`).
pub fn get_words(line: &str, position: Position) -> Option<(String, String)> {
    let head = head(line, position);
    let start = trailing_run_start(&TRAILING_MEMBER_RE, head);

    if !head[start..].contains('.') {
        let start = trailing_run_start(&TRAILING_SUBSCRIPT_RE, head);
        if !head[start..].contains('[') {
            return None;
        }
        let run = LEADING_SUBSCRIPT_RE.find(&line[start..])?.as_str();
        let mut parts = run.split('[');
        let object = parts.next().unwrap_or_default();
        let quoted = parts.next().unwrap_or_default();
        // Drop the surrounding quotes.
        let field = quoted
            .get(1..quoted.len().saturating_sub(1))
            .unwrap_or_default();
        return Some((object.to_string(), field.to_string()));
    }

    let run = LEADING_MEMBER_RE.find(&line[start..])?.as_str();
    let mut parts = run.split('.');
    let object = parts.next().unwrap_or_default();
    let field = parts.next().unwrap_or_default();
    Some((object.to_string(), field.to_string()))
}

/// Whether `character` (a UTF-16 column) lies strictly inside the
/// identifier or the path of an import found on `line`.
pub fn is_import_line_match(line: &str, identifier: &str, specifier: &str, character: u32) -> bool {
    let inside = |needle: &str| {
        let Some(offset) = line.find(needle) else {
            return false;
        };
        let start = utf16_len(&line[..offset]) + 1;
        character > start && character < start + utf16_len(needle)
    };
    inside(specifier) || inside(identifier)
}

#[cfg(test)]
#[path = "../tests/words_tests.rs"]
mod words_tests;
