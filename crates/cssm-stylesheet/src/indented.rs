//! Parser for the indented SASS syntax.
//!
//! The text is first folded into logical lines (comments absorb their
//! deeper-indented continuation lines, selectors ending in `,` absorb the
//! next line), then the tree is built from indentation with an explicit
//! frame stack.

use cssm_common::limits::MAX_BLOCK_DEPTH;
use cssm_common::{SourcePosition, utf16_len};

use crate::error::ParseError;
use crate::node::{AtRuleData, CommentData, NodeData, NodeIndex, RuleData, Stylesheet};
use crate::parser::parse_declaration;
use crate::syntax::StylesheetSyntax;

#[derive(Debug)]
enum LineKind {
    Comment { text: String, inline: bool },
    Statement(String),
}

#[derive(Debug)]
struct LogicalLine {
    indent: usize,
    pos: SourcePosition,
    kind: LineKind,
}

struct Frame {
    /// `None` for the root frame.
    indent: Option<usize>,
    node: NodeIndex,
    /// Indentation of the first child; every later child must match it.
    child_indent: Option<usize>,
}

pub(crate) struct IndentedParser<'a> {
    text: &'a str,
}

impl<'a> IndentedParser<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        IndentedParser { text }
    }

    pub(crate) fn parse(self) -> Result<Stylesheet, ParseError> {
        let lines = logical_lines(self.text);
        let mut sheet = Stylesheet::new(StylesheetSyntax::Sass);
        let mut stack = vec![Frame {
            indent: None,
            node: sheet.root(),
            child_indent: None,
        }];

        for (i, line) in lines.iter().enumerate() {
            while stack.len() > 1
                && stack
                    .last()
                    .and_then(|frame| frame.indent)
                    .is_some_and(|indent| indent >= line.indent)
            {
                stack.pop();
            }

            let Some(parent) = stack.last_mut() else {
                break;
            };
            match parent.child_indent {
                Some(expected) if expected != line.indent => {
                    return Err(ParseError::InconsistentIndentation { pos: line.pos });
                }
                Some(_) => {}
                None => parent.child_indent = Some(line.indent),
            }
            let parent_node = parent.node;

            let has_children = lines
                .get(i + 1)
                .is_some_and(|next| next.indent > line.indent);

            let data = match &line.kind {
                LineKind::Comment { text, inline } => NodeData::Comment(CommentData {
                    text: text.clone(),
                    inline: *inline,
                }),
                LineKind::Statement(text) => match statement_data(text, has_children) {
                    Some(data) => data,
                    None => continue,
                },
            };
            let node = sheet.add_child(parent_node, data, line.pos);

            if has_children {
                if stack.len() > MAX_BLOCK_DEPTH {
                    return Err(ParseError::NestingTooDeep {
                        pos: line.pos,
                        limit: MAX_BLOCK_DEPTH,
                    });
                }
                stack.push(Frame {
                    indent: Some(line.indent),
                    node,
                    child_indent: None,
                });
            }
        }

        Ok(sheet)
    }
}

fn statement_data(text: &str, has_children: bool) -> Option<NodeData> {
    if let Some(rest) = text.strip_prefix('@') {
        let name_len = rest
            .find(|ch: char| !(ch.is_alphanumeric() || ch == '-' || ch == '_'))
            .unwrap_or(rest.len());
        return Some(NodeData::AtRule(AtRuleData {
            name: rest[..name_len].to_lowercase(),
            params: rest[name_len..].trim().to_string(),
            has_block: has_children,
        }));
    }
    // `=name` defines a mixin, `+name` includes one.
    for (prefix, name) in [('=', "mixin"), ('+', "include")] {
        if let Some(rest) = text.strip_prefix(prefix) {
            return Some(NodeData::AtRule(AtRuleData {
                name: name.to_string(),
                params: rest.trim().to_string(),
                has_block: has_children,
            }));
        }
    }
    if has_children {
        return Some(NodeData::Rule(RuleData {
            selector: text.to_string(),
        }));
    }
    parse_declaration(text).map(NodeData::Declaration)
}

fn logical_lines(text: &str) -> Vec<LogicalLine> {
    let raw: Vec<&str> = text.lines().collect();
    let mut lines = Vec::new();
    let mut i = 0;

    while i < raw.len() {
        let line = raw[i];
        let content = line.trim_start();
        if content.trim_end().is_empty() {
            i += 1;
            continue;
        }
        let indent_text = &line[..line.len() - content.len()];
        let indent = indent_text.chars().count();
        let pos = SourcePosition::new(i as u32 + 1, utf16_len(indent_text) + 1);

        if content.starts_with("/*") || content.starts_with("//") {
            let inline = content.starts_with("//");
            let mut body = vec![content.trim_end()];
            let mut j = i + 1;
            let mut end = j;
            while j < raw.len() {
                let next = raw[j];
                let next_content = next.trim_start();
                if next_content.trim_end().is_empty() {
                    j += 1;
                    continue;
                }
                if next.chars().count() - next_content.chars().count() <= indent {
                    break;
                }
                body.push(next_content.trim_end());
                j += 1;
                end = j;
            }
            lines.push(LogicalLine {
                indent,
                pos,
                kind: LineKind::Comment {
                    text: comment_text(&body, inline),
                    inline,
                },
            });
            i = end;
            continue;
        }

        let mut statement = content.trim_end().to_string();
        let mut j = i + 1;
        while statement.ends_with(',') && j < raw.len() {
            let next = raw[j].trim_end();
            j += 1;
            if next.trim_start().is_empty() {
                continue;
            }
            // Keep the line break and indentation so token columns stay exact.
            statement.push('\n');
            statement.push_str(next);
        }
        lines.push(LogicalLine {
            indent,
            pos,
            kind: LineKind::Statement(statement),
        });
        i = j;
    }

    lines
}

fn comment_text(body: &[&str], inline: bool) -> String {
    let joined = body.join("\n");
    let inner = if inline {
        joined.strip_prefix("//").unwrap_or(&joined)
    } else {
        let without_open = joined.strip_prefix("/*").unwrap_or(&joined);
        without_open.strip_suffix("*/").unwrap_or(without_open)
    };
    inner.trim().to_string()
}
