//! Hover text for a classname entry.

use serde::Serialize;

/// A code block in a given language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkedString {
    pub language: String,
    pub value: String,
}

/// Hover result: the rendered rule as a CSS snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverInfo {
    pub contents: MarkedString,
}

impl HoverInfo {
    pub fn css(value: String) -> Self {
        HoverInfo {
            contents: MarkedString {
                language: "css".to_string(),
                value,
            },
        }
    }
}

/// Render a class as CSS: its leading comments, then `.name {` with one
/// declaration per line, then `}`. Lines are joined with `eol`.
///
/// ```text
/// /* single line */
/// /* first line
///  second line
///  */
/// .name {
///   color: red;
/// }
/// ```
pub fn stringify_classname(
    classname: &str,
    declarations: &[String],
    comments: &[String],
    eol: &str,
) -> String {
    let mut out = String::new();

    for (i, comment) in comments.iter().enumerate() {
        if i > 0 {
            out.push_str(eol);
        }
        let mut lines = comment.split(eol);
        let first = lines.next().unwrap_or_default();
        let rest: Vec<&str> = lines.collect();
        if rest.is_empty() {
            out.push_str(&format!("/*{comment} */"));
            continue;
        }
        out.push_str("/*");
        out.push_str(first);
        for line in rest {
            out.push_str(eol);
            out.push(' ');
            out.push_str(line.trim_start());
        }
        out.push_str(eol);
        out.push_str(" */");
    }
    if !comments.is_empty() {
        out.push_str(eol);
    }

    if declarations.is_empty() {
        out.push_str(&format!(".{classname} {{}}"));
        return out;
    }
    out.push_str(&format!(".{classname} {{"));
    for declaration in declarations {
        out.push_str(eol);
        out.push_str("  ");
        out.push_str(declaration);
    }
    out.push_str(eol);
    out.push('}');
    out
}
