//! Selector algebra: splitting, sanitizing, class token matching and
//! nesting substitution.
//!
//! Everything here is a pure function over selector text.

use cssm_common::SourcePosition;
use once_cell::sync::Lazy;
use regex::Regex;

/// `.` followed by identifier characters: ASCII letters of either case,
/// digits, `-`, `_`, or emoji-presentation characters.
static CLASS_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\.[-0-9a-z_\p{Emoji_Presentation}]+").expect("class token pattern is valid")
});

static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// The character in a nested selector that stands for the ancestor selector.
pub const NESTING_PLACEHOLDER: char = '&';

/// Split a raw selector on `,` and sanitize every piece.
pub fn split_selectors(raw: &str) -> Vec<String> {
    raw.split(',').map(sanitize_selector).collect()
}

/// Remove escaped newline/tab sequences (`\n`, `\t` written as two
/// characters), collapse whitespace runs to one space and trim.
pub fn sanitize_selector(selector: &str) -> String {
    let without_escapes = selector.replace("\\n", "").replace("\\t", "");
    WHITESPACE_RUN_RE
        .replace_all(&without_escapes, " ")
        .trim()
        .to_string()
}

/// All class tokens (including the leading `.`) in a sanitized selector, in
/// order of appearance.
pub fn class_tokens(selector: &str) -> impl Iterator<Item = &str> {
    CLASS_TOKEN_RE.find_iter(selector).map(|m| m.as_str())
}

/// Combine the resolved selectors of the ancestor rule with the pieces of a
/// nested rule.
///
/// Every (ancestor, piece) pair yields one selector in which the first
/// [`NESTING_PLACEHOLDER`] of the piece is replaced by the ancestor text.
/// Pieces without a placeholder are kept as they are, once per ancestor.
/// Without ancestor selectors the pieces pass through unchanged.
pub fn substitute_nesting(ancestor_selectors: &[String], pieces: &[String]) -> Vec<String> {
    if ancestor_selectors.is_empty() {
        return pieces.to_vec();
    }

    let mut combined = Vec::with_capacity(ancestor_selectors.len() * pieces.len());
    for ancestor in ancestor_selectors {
        for piece in pieces {
            let mut placeholder = [0u8; 4];
            let placeholder = NESTING_PLACEHOLDER.encode_utf8(&mut placeholder);
            combined.push(piece.replacen(&*placeholder, ancestor, 1));
        }
    }
    combined
}

/// Position of `token` inside a rule whose raw selector starts at
/// `rule_start`.
///
/// Walks the raw selector up to the first class token that is exactly
/// `token`, counting line breaks and UTF-16 columns. A longer class that
/// merely starts with the same text (`.btn-primary` for `.btn`) does not
/// match. When the token cannot be found in the raw text (it only appears
/// after sanitizing) the rule start is returned.
pub fn token_position(
    raw_selector: &str,
    token: &str,
    rule_start: SourcePosition,
) -> SourcePosition {
    let Some(offset) = CLASS_TOKEN_RE
        .find_iter(raw_selector)
        .find(|m| m.as_str() == token)
        .map(|m| m.start())
    else {
        return rule_start;
    };

    let mut line = rule_start.line;
    let mut column = rule_start.column;
    let mut chars = raw_selector[..offset].chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\n' => {
                line += 1;
                column = 1;
            }
            '\r' if chars.peek() != Some(&'\n') => {
                line += 1;
                column = 1;
            }
            '\r' => {}
            _ => column += ch.len_utf16() as u32,
        }
    }
    SourcePosition::new(line, column)
}

#[cfg(test)]
#[path = "../tests/selectors_tests.rs"]
mod selectors_tests;
