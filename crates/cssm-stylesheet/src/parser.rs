//! Block parser for the brace syntaxes (CSS, LESS, SCSS).
//!
//! Open blocks are tracked on an explicit stack instead of recursion, so the
//! only bound on nesting is [`MAX_BLOCK_DEPTH`].

use cssm_common::SourcePosition;
use cssm_common::limits::MAX_BLOCK_DEPTH;

use crate::error::ParseError;
use crate::node::{
    AtRuleData, CommentData, DeclarationData, NodeData, NodeIndex, RuleData, Stylesheet,
};
use crate::scanner::Scanner;
use crate::syntax::StylesheetSyntax;

/// What stopped a prelude scan. The terminator itself is not consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    OpenBrace,
    Semicolon,
    CloseBrace,
    Eof,
}

pub(crate) struct BlockParser<'a> {
    scanner: Scanner<'a>,
    syntax: StylesheetSyntax,
    sheet: Stylesheet,
    /// Currently open blocks with the position of the node that opened them.
    open: Vec<(NodeIndex, SourcePosition)>,
}

impl<'a> BlockParser<'a> {
    pub(crate) fn new(text: &'a str, syntax: StylesheetSyntax) -> Self {
        BlockParser {
            scanner: Scanner::new(text),
            syntax,
            sheet: Stylesheet::new(syntax),
            open: Vec::new(),
        }
    }

    pub(crate) fn parse(mut self) -> Result<Stylesheet, ParseError> {
        loop {
            self.scanner.skip_whitespace();
            let Some(ch) = self.scanner.peek() else {
                break;
            };
            let start = self.scanner.position();
            match ch {
                '/' if self.scanner.peek_next() == Some('*') => {
                    let body = self.scanner.scan_block_comment()?;
                    self.add_comment(body, false, start);
                }
                '/' if self.syntax.allows_line_comments()
                    && self.scanner.peek_next() == Some('/') =>
                {
                    let body = self.scanner.scan_line_comment();
                    self.add_comment(body, true, start);
                }
                '}' => {
                    self.scanner.bump();
                    if self.open.pop().is_none() {
                        return Err(ParseError::UnexpectedCloseBrace { pos: start });
                    }
                }
                ';' => {
                    self.scanner.bump();
                }
                '@' => self.parse_at_rule(start)?,
                _ => self.parse_statement(start)?,
            }
        }

        if let Some(&(_, pos)) = self.open.last() {
            return Err(ParseError::UnclosedBlock { pos });
        }
        Ok(self.sheet)
    }

    fn current(&self) -> NodeIndex {
        self.open
            .last()
            .map(|&(index, _)| index)
            .unwrap_or_else(|| self.sheet.root())
    }

    fn add(&mut self, data: NodeData, start: SourcePosition) -> NodeIndex {
        let parent = self.current();
        self.sheet.add_child(parent, data, start)
    }

    fn add_comment(&mut self, body: &str, inline: bool, start: SourcePosition) {
        self.add(
            NodeData::Comment(CommentData {
                text: body.trim().to_string(),
                inline,
            }),
            start,
        );
    }

    /// Consume the `{` at the cursor and make `node` the current block.
    fn open_block(&mut self, node: NodeIndex, start: SourcePosition) -> Result<(), ParseError> {
        if self.open.len() >= MAX_BLOCK_DEPTH {
            return Err(ParseError::NestingTooDeep {
                pos: start,
                limit: MAX_BLOCK_DEPTH,
            });
        }
        self.scanner.bump();
        self.open.push((node, start));
        Ok(())
    }

    fn parse_at_rule(&mut self, start: SourcePosition) -> Result<(), ParseError> {
        self.scanner.bump();
        let mut name = String::new();
        while let Some(ch) = self.scanner.peek() {
            if !(ch.is_alphanumeric() || ch == '-' || ch == '_') {
                break;
            }
            name.push(ch);
            self.scanner.bump();
        }

        let (params, terminator) = self.scan_prelude()?;
        let has_block = terminator == Terminator::OpenBrace;
        let node = self.add(
            NodeData::AtRule(AtRuleData {
                name: name.to_lowercase(),
                params: params.trim().to_string(),
                has_block,
            }),
            start,
        );

        match terminator {
            Terminator::OpenBrace => self.open_block(node, start)?,
            Terminator::Semicolon => {
                self.scanner.bump();
            }
            Terminator::CloseBrace | Terminator::Eof => {}
        }
        Ok(())
    }

    fn parse_statement(&mut self, start: SourcePosition) -> Result<(), ParseError> {
        let (text, terminator) = self.scan_prelude()?;
        match terminator {
            Terminator::OpenBrace => {
                let node = self.add(
                    NodeData::Rule(RuleData {
                        selector: text.trim().to_string(),
                    }),
                    start,
                );
                self.open_block(node, start)?;
            }
            Terminator::Semicolon | Terminator::CloseBrace | Terminator::Eof => {
                if let Some(decl) = parse_declaration(&text) {
                    self.add(NodeData::Declaration(decl), start);
                }
                if terminator == Terminator::Semicolon {
                    self.scanner.bump();
                }
            }
        }
        Ok(())
    }

    /// Collect text up to the next top-level `{`, `;` or `}`.
    ///
    /// Strings and escapes are copied verbatim, comments are dropped, and
    /// braces inside `#{...}` interpolation or parentheses do not terminate.
    fn scan_prelude(&mut self) -> Result<(String, Terminator), ParseError> {
        let mut text = String::new();
        let mut parens = 0usize;
        let mut interpolation = 0usize;

        loop {
            let Some(ch) = self.scanner.peek() else {
                return Ok((text, Terminator::Eof));
            };
            match ch {
                '"' | '\'' => {
                    text.push_str(self.scanner.scan_string()?);
                    continue;
                }
                '/' if self.scanner.peek_next() == Some('*') => {
                    self.scanner.scan_block_comment()?;
                    continue;
                }
                '/' if parens == 0
                    && self.syntax.allows_line_comments()
                    && self.scanner.peek_next() == Some('/') =>
                {
                    self.scanner.scan_line_comment();
                    continue;
                }
                '\\' => {
                    text.push(ch);
                    self.scanner.bump();
                    if let Some(escaped) = self.scanner.bump() {
                        text.push(escaped);
                    }
                    continue;
                }
                '#' if self.scanner.peek_next() == Some('{') => {
                    interpolation += 1;
                    text.push_str("#{");
                    self.scanner.bump();
                    self.scanner.bump();
                    continue;
                }
                '(' | '[' => parens += 1,
                ')' | ']' => parens = parens.saturating_sub(1),
                '{' if interpolation == 0 && parens == 0 => {
                    return Ok((text, Terminator::OpenBrace));
                }
                '}' if interpolation > 0 => interpolation -= 1,
                '}' => return Ok((text, Terminator::CloseBrace)),
                ';' if parens == 0 && interpolation == 0 => {
                    return Ok((text, Terminator::Semicolon));
                }
                _ => {}
            }
            text.push(ch);
            self.scanner.bump();
        }
    }
}

/// Split `prop: value` text into a declaration. Text without a `:` (e.g. a
/// LESS mixin call) yields `None`.
pub(crate) fn parse_declaration(text: &str) -> Option<DeclarationData> {
    let (prop, value) = text.split_once(':')?;
    let prop = prop.trim();
    if prop.is_empty() {
        return None;
    }
    let (value, important) = split_important(value.trim());
    Some(DeclarationData {
        prop: prop.to_string(),
        value,
        important,
    })
}

fn split_important(value: &str) -> (String, bool) {
    if let Some(bang) = value.rfind('!') {
        let flag = value[bang + 1..].trim();
        if flag.eq_ignore_ascii_case("important") {
            return (value[..bang].trim_end().to_string(), true);
        }
    }
    (value.to_string(), false)
}
