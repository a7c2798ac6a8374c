//! Providers: the two ways of obtaining symbols and trees.
//!
//! Each provider turns either a textual spec (through its formatter) or real
//! input (through the attached capability) into values the comparator takes.

use tracing::{debug, trace};

use crate::error::Error;
use crate::format::SymbolFormatter;
use crate::symbol::Symbol;
use crate::traits::{Lexer, Parser};
use crate::tree::DerivationTree;
use crate::tree_format::TreeFormatter;

/// Produces symbol sequences from token-list specs or from the lexer.
#[derive(Debug, Clone)]
pub struct SymbolProvider<L> {
    lexer: L,
    formatter: SymbolFormatter,
}

impl<L: Lexer> SymbolProvider<L> {
    /// A provider with the default notation.
    pub fn new(lexer: L) -> Self {
        Self {
            lexer,
            formatter: SymbolFormatter::default(),
        }
    }

    /// Parses a token-list spec with the active notation.
    pub fn from_spec(&self, spec: &str) -> Result<Vec<Symbol>, Error> {
        let symbols = self.formatter.parse_list(spec)?;
        trace!(count = symbols.len(), "parsed symbol spec");
        Ok(symbols)
    }

    /// Tokenizes real input with the attached lexer.
    pub fn from_input(&self, text: &str) -> Result<Vec<Symbol>, Error> {
        let symbols = self.lexer.tokenize(text)?;
        debug!(input_len = text.len(), count = symbols.len(), "tokenized input");
        Ok(symbols)
    }

    /// Renders symbols in the active notation.
    pub fn render(&self, symbols: &[Symbol]) -> String {
        self.formatter.render(symbols)
    }

    pub fn formatter(&self) -> &SymbolFormatter {
        &self.formatter
    }

    /// Replaces the notation used by later calls.
    pub fn set_formatter(&mut self, formatter: SymbolFormatter) {
        self.formatter = formatter;
    }

    pub fn lexer(&self) -> &L {
        &self.lexer
    }
}

/// Produces derivation trees from tree specs or from the parser.
#[derive(Debug, Clone)]
pub struct TreeProvider<P> {
    parser: P,
    formatter: TreeFormatter,
}

impl<P: Parser> TreeProvider<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            formatter: TreeFormatter::default(),
        }
    }

    /// Parses a tree spec; leaves use the tree formatter's symbol notation.
    pub fn from_spec(&self, spec: &str) -> Result<DerivationTree, Error> {
        self.formatter.parse(spec)
    }

    /// Derives `entry_rule` from `symbols` with the attached parser.
    pub fn from_input(&self, symbols: &[Symbol], entry_rule: &str) -> Result<DerivationTree, Error> {
        let tree: DerivationTree = self.parser.parse(symbols, entry_rule)?.into();
        debug!(entry_rule, nodes = tree.size(), "parsed symbols");
        Ok(tree)
    }

    pub fn formatter(&self) -> &TreeFormatter {
        &self.formatter
    }

    /// Mutable access, e.g. to swap the leaf notation in place:
    /// `provider.formatter_mut().set_symbol_formatter(SymbolFormatter::Verbose)`.
    pub fn formatter_mut(&mut self) -> &mut TreeFormatter {
        &mut self.formatter
    }

    pub fn set_formatter(&mut self, formatter: TreeFormatter) {
        self.formatter = formatter;
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }
}
