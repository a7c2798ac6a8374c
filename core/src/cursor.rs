//! Character cursor over spec text.
//!
//! Every notation parser in this crate scans its input through a [`Cursor`],
//! so syntax errors report offsets into the original spec string no matter
//! how deeply the parsers are nested.

use crate::error::SpecSyntaxError;
use crate::symbol::unescape_text;

/// A position within a spec string.
///
/// Cursors are cheap to copy; [`Cursor::fork`] and [`Cursor::rewind`] give
/// the parsers backtracking.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// The whole spec text.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Moves back (or forward) to a previously observed offset.
    #[inline]
    pub fn rewind(&mut self, pos: usize) {
        self.pos = pos.min(self.source.len());
    }

    /// A copy for lookahead that leaves `self` untouched.
    #[inline]
    pub fn fork(&self) -> Self {
        *self
    }

    /// Unconsumed input.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character after the next one.
    pub fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }

    /// Consumes `c` if it is next.
    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes `s` if the input continues with it.
    pub fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consumes `c` or fails with an error naming it.
    pub fn expect(&mut self, c: char) -> Result<(), SpecSyntaxError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{c}`")))
        }
    }

    pub fn take_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.source[start..self.pos]
    }

    /// A name made of letters, digits and `_`, not starting with a digit.
    pub fn identifier(&mut self) -> Option<&'a str> {
        match self.peek() {
            Some(c) if c.is_alphabetic() || c == '_' => {}
            _ => return None,
        }
        Some(self.take_while(|c| c.is_alphanumeric() || c == '_'))
    }

    /// A single-quoted, backslash-escaped string; returns it unescaped.
    pub fn quoted(&mut self) -> Result<String, SpecSyntaxError> {
        let open = self.pos;
        self.expect('\'')?;
        let body_start = self.pos;
        loop {
            match self.bump() {
                None => return Err(self.error_at(open, "unterminated quoted text")),
                Some('\\') => {
                    if self.bump().is_none() {
                        return Err(self.error_at(open, "unterminated quoted text"));
                    }
                }
                Some('\'') => break,
                Some(_) => {}
            }
        }
        let body = &self.source[body_start..self.pos - 1];
        unescape_text(body).map_err(|i| self.error_at(body_start + i, "invalid escape sequence"))
    }

    /// An unsigned decimal number.
    pub fn unsigned(&mut self) -> Result<usize, SpecSyntaxError> {
        let start = self.pos;
        let digits = self.take_while(|c| c.is_ascii_digit());
        digits
            .parse()
            .map_err(|_| self.error_at(start, "expected a number"))
    }

    /// A decimal number with an optional leading `-`.
    pub fn signed(&mut self) -> Result<i64, SpecSyntaxError> {
        let start = self.pos;
        let negative = self.eat('-');
        let digits = self.take_while(|c| c.is_ascii_digit());
        let value: i64 = digits
            .parse()
            .map_err(|_| self.error_at(start, "expected a number"))?;
        Ok(if negative { -value } else { value })
    }

    /// An error at the current position.
    pub fn error(&self, message: impl Into<String>) -> SpecSyntaxError {
        SpecSyntaxError::at(self.source, self.pos, message)
    }

    /// An error at an earlier offset.
    pub fn error_at(&self, offset: usize, message: impl Into<String>) -> SpecSyntaxError {
        SpecSyntaxError::at(self.source, offset, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_unescapes() {
        let mut cur = Cursor::new(r"'\r\n' rest");
        assert_eq!(cur.quoted().unwrap(), "\r\n");
        assert_eq!(cur.rest(), " rest");
    }

    #[test]
    fn test_quoted_escaped_quote() {
        let mut cur = Cursor::new(r"'it\'s'");
        assert_eq!(cur.quoted().unwrap(), "it's");
        assert!(cur.is_eof());
    }

    #[test]
    fn test_quoted_unterminated() {
        let mut cur = Cursor::new("  'abc");
        cur.skip_whitespace();
        let err = cur.quoted().unwrap_err();
        assert_eq!(err.offset, 2);
        assert_eq!(err.message, "unterminated quoted text");
    }

    #[test]
    fn test_fork_and_rewind() {
        let mut cur = Cursor::new("expr (INT '1')");
        let mut fork = cur.fork();
        assert_eq!(fork.identifier(), Some("expr"));
        assert_eq!(cur.pos(), 0);

        cur.identifier();
        cur.skip_whitespace();
        let mark = cur.pos();
        assert!(cur.eat('('));
        cur.rewind(mark);
        assert_eq!(cur.peek(), Some('('));
        assert_eq!(cur.peek_second(), Some('I'));
    }

    #[test]
    fn test_numbers() {
        let mut cur = Cursor::new("12:-1,x");
        assert_eq!(cur.unsigned().unwrap(), 12);
        cur.expect(':').unwrap();
        assert_eq!(cur.signed().unwrap(), -1);
        cur.expect(',').unwrap();
        assert!(cur.unsigned().is_err());
        assert!(cur.expect(']').is_err());
    }
}
