//! Character cursor with line/column tracking.
//!
//! Lines and columns are 1-based. Columns advance by the UTF-16 length of
//! each character so they line up with editor coordinates.

use cssm_common::SourcePosition;
use memchr::memmem;

use crate::error::ParseError;

#[derive(Debug, Clone)]
pub(crate) struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Scanner {
            text,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    #[inline]
    pub(crate) fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column)
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// Character after the current one.
    #[inline]
    pub(crate) fn peek_next(&self) -> Option<char> {
        let mut chars = self.text[self.pos..].chars();
        chars.next();
        chars.next()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        match ch {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            '\r' => {
                // `\r\n` counts once, on the `\n`.
                if self.peek() != Some('\n') {
                    self.line += 1;
                    self.column = 1;
                }
            }
            _ => self.column += ch.len_utf16() as u32,
        }
        Some(ch)
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    /// Consume a `/* ... */` comment starting at the cursor and return its
    /// body (without delimiters).
    pub(crate) fn scan_block_comment(&mut self) -> Result<&'a str, ParseError> {
        let start = self.position();
        self.bump();
        self.bump();
        let body_start = self.pos;
        let Some(offset) = memmem::find(self.text[body_start..].as_bytes(), b"*/") else {
            return Err(ParseError::UnclosedComment { pos: start });
        };
        let body_end = body_start + offset;
        while self.pos < body_end + 2 {
            self.bump();
        }
        Ok(&self.text[body_start..body_end])
    }

    /// Consume a `// ...` comment up to (not including) the line break and
    /// return its body.
    pub(crate) fn scan_line_comment(&mut self) -> &'a str {
        self.bump();
        self.bump();
        let body_start = self.pos;
        while let Some(ch) = self.peek() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.bump();
        }
        &self.text[body_start..self.pos]
    }

    /// Consume a quoted string (cursor on the opening quote) and return it
    /// including its quotes.
    pub(crate) fn scan_string(&mut self) -> Result<&'a str, ParseError> {
        let start_pos = self.position();
        let start = self.pos;
        let Some(quote) = self.bump() else {
            return Err(ParseError::UnclosedString { pos: start_pos });
        };
        loop {
            match self.bump() {
                None => return Err(ParseError::UnclosedString { pos: start_pos }),
                Some('\\') => {
                    self.bump();
                }
                Some(ch) if ch == quote => break,
                Some('\n') => return Err(ParseError::UnclosedString { pos: start_pos }),
                Some(_) => {}
            }
        }
        Ok(&self.text[start..self.pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_lines_and_utf16_columns() {
        let mut scanner = Scanner::new("a😀b\r\nc");
        scanner.bump();
        scanner.bump();
        assert_eq!(scanner.position(), SourcePosition::new(1, 4));
        scanner.bump();
        scanner.bump();
        scanner.bump();
        assert_eq!(scanner.position(), SourcePosition::new(2, 1));
        assert_eq!(scanner.peek(), Some('c'));
    }

    #[test]
    fn block_comment_body() {
        let mut scanner = Scanner::new("/* hi\n there */x");
        assert_eq!(scanner.scan_block_comment().unwrap(), " hi\n there ");
        assert_eq!(scanner.peek(), Some('x'));
        assert_eq!(scanner.position(), SourcePosition::new(2, 10));
    }

    #[test]
    fn unclosed_comment_reports_start() {
        let mut scanner = Scanner::new("  /* never");
        scanner.skip_whitespace();
        assert_eq!(
            scanner.scan_block_comment(),
            Err(ParseError::UnclosedComment {
                pos: SourcePosition::new(1, 3)
            })
        );
    }

    #[test]
    fn strings_honour_escapes() {
        let mut scanner = Scanner::new(r#""a\"b" rest"#);
        assert_eq!(scanner.scan_string().unwrap(), r#""a\"b""#);
        assert_eq!(scanner.peek(), Some(' '));
    }
}
