//! Token-list notations.
//!
//! A [`SymbolFormatter`] turns spec text into [`Symbol`]s and back. The set of
//! notations is closed:
//!
//! | Strategy | Item | Positions |
//! |----------|------|-----------|
//! | [`SymbolFormatter::Default`] | `(ID 'x')`, `'='`, `EOF` | none |
//! | [`SymbolFormatter::Verbose`] | `[@0,0:0='x',<ID>,1:0]` | all |
//! | [`SymbolFormatter::Pattern`] | user-defined, e.g. `ID: "x"` | as written |
//!
//! Rendering is meant for diagnostics. Text rendered by one strategy parses
//! back to the same symbols with that strategy, minus any fields the notation
//! does not encode.

mod default;
mod pattern;
mod verbose;

pub use pattern::{PatternField, PatternFormat};

use tracing::trace;

use crate::cursor::Cursor;
use crate::error::SpecSyntaxError;
use crate::symbol::Symbol;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SymbolFormatter {
    /// Whitespace-separated `(TYPE 'text')`, `'literal'` and bare `TYPE` items.
    #[default]
    Default,
    /// One `[@idx,start:stop='text',<TYPE>,line:col]` item per token.
    Verbose,
    /// A notation compiled from a pattern string.
    Pattern(PatternFormat),
}

impl SymbolFormatter {
    /// Compiles a pattern-defined notation. See [`PatternFormat`].
    pub fn of_pattern(pattern: &str) -> Result<Self, SpecSyntaxError> {
        PatternFormat::compile(pattern).map(Self::Pattern)
    }

    /// Parses a whole token-list spec.
    pub fn parse_list(&self, spec: &str) -> Result<Vec<Symbol>, SpecSyntaxError> {
        let symbols = match self {
            Self::Pattern(pattern) => pattern.parse_lines(spec)?,
            _ => {
                let mut cur = Cursor::new(spec);
                let mut symbols = Vec::new();
                cur.skip_whitespace();
                while !cur.is_eof() {
                    symbols.push(self.parse_item(&mut cur)?);
                    cur.skip_whitespace();
                }
                symbols
            }
        };
        trace!(count = symbols.len(), "parsed symbol spec");
        Ok(symbols)
    }

    /// Parses one item at the cursor, leaving the cursor just past it.
    ///
    /// This is the form embedded as leaves in tree notation.
    pub fn parse_item(&self, cur: &mut Cursor<'_>) -> Result<Symbol, SpecSyntaxError> {
        match self {
            Self::Default => default::parse_item(cur),
            Self::Verbose => verbose::parse_item(cur),
            Self::Pattern(pattern) => pattern.parse_item(cur),
        }
    }

    /// Renders one symbol as a single item.
    pub fn render_symbol(&self, symbol: &Symbol) -> String {
        match self {
            Self::Default => default::render_item(symbol),
            Self::Verbose => verbose::render_item(symbol),
            Self::Pattern(pattern) => pattern
                .render_item(symbol)
                .unwrap_or_else(|| default::render_item(symbol)),
        }
    }

    /// Renders a list: space-separated for the default notation, one item per
    /// line otherwise.
    pub fn render(&self, symbols: &[Symbol]) -> String {
        let sep = match self {
            Self::Default => " ",
            _ => "\n",
        };
        symbols
            .iter()
            .map(|s| self.render_symbol(s))
            .collect::<Vec<_>>()
            .join(sep)
    }
}

impl core::fmt::Display for Symbol {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&default::render_item(self))
    }
}
