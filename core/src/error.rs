//! Core error types for gramcheck.
//!
//! Spec parsing reports [`SpecSyntaxError`], the external capabilities report
//! [`LexFailure`] and [`ParseFailure`], and [`Error`] unifies the three for
//! provider and harness calls.
//!
//! A failed comparison is not an error: see [`crate::MatchResult`].

use thiserror::Error;

/// A malformed textual spec (token notation, tree notation or pattern).
///
/// Carries the byte offset of the first divergence from the notation's
/// grammar together with its 1-based line and 0-based column, plus the
/// offending fragment of input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at {line}:{column} (offset {offset}): `{fragment}`")]
pub struct SpecSyntaxError {
    /// What the parser expected or rejected.
    pub message: String,
    /// Byte offset into the spec text.
    pub offset: usize,
    /// 1-based line of `offset`.
    pub line: usize,
    /// 0-based column of `offset`, in characters.
    pub column: usize,
    /// Input starting at `offset`, truncated for display.
    pub fragment: String,
}

/// Number of characters of input quoted in [`SpecSyntaxError::fragment`].
pub const FRAGMENT_LEN: usize = 24;

impl SpecSyntaxError {
    /// Builds an error at `offset` within `source`.
    ///
    /// `offset` is clamped to the source length and rounded down to a
    /// character boundary.
    pub fn at(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }

        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = source[line_start..offset].chars().count();
        let fragment = source[offset..].chars().take(FRAGMENT_LEN).collect();

        Self {
            message: message.into(),
            offset,
            line,
            column,
            fragment,
        }
    }
}

/// The lexer capability could not tokenize its input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("lexing failed at offset {offset}: {message}")]
pub struct LexFailure {
    /// Byte offset of the offending input.
    pub offset: usize,
    /// The lexer's own diagnostic.
    pub message: String,
}

impl LexFailure {
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// The parser capability could not derive the entry rule from its symbols.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot derive `{entry_rule}`: {message}")]
pub struct ParseFailure {
    /// The rule the parse started from.
    pub entry_rule: String,
    /// The parser's own diagnostic.
    pub message: String,
}

impl ParseFailure {
    pub fn new(entry_rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            entry_rule: entry_rule.into(),
            message: message.into(),
        }
    }
}

/// Any failure of a provider call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("spec syntax error: {0}")]
    Syntax(#[from] SpecSyntaxError),

    #[error(transparent)]
    Lex(#[from] LexFailure),

    #[error(transparent)]
    Parse(#[from] ParseFailure),

    /// Nested tree notation exceeded the configured depth.
    #[error("recursion limit exceeded: depth {depth} > limit {limit}")]
    RecursionLimitExceeded { depth: usize, limit: usize },
}
