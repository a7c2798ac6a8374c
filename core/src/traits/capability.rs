use crate::error::{LexFailure, ParseFailure};
use crate::symbol::Symbol;
use crate::tree::DerivationTree;

/// The lexer under test.
///
/// Implementations tokenize with the conventions the notations assume:
/// type names from the grammar's vocabulary, 1-based lines, 0-based
/// columns, and a final EOF symbol whose text is `<EOF>`.
///
/// Each call gets exclusive use of the lexer for its duration; stateful
/// generated lexers should be created per call.
///
/// # Example
///
/// ```ignore
/// impl Lexer for CalcLexer {
///     fn tokenize(&self, text: &str) -> Result<Vec<Symbol>, LexFailure> {
///         let mut symbols = Vec::new();
///         for (token, span) in Token::lexer(text).spanned() {
///             let token = token.map_err(|_| LexFailure::new(span.start, "bad input"))?;
///             symbols.push(token.to_symbol(text, span));
///         }
///         symbols.push(Symbol::eof());
///         Ok(symbols)
///     }
/// }
/// ```
pub trait Lexer {
    fn tokenize(&self, text: &str) -> Result<Vec<Symbol>, LexFailure>;
}

/// The parser under test.
///
/// `Output` is the parser's native tree; converting it into a
/// [`DerivationTree`] must keep rule names and wrap each consumed symbol
/// unchanged in a leaf.
pub trait Parser {
    type Output: Into<DerivationTree>;

    /// Derives `entry_rule` from `symbols`, failing with the parser's own
    /// diagnostic when it cannot.
    fn parse(&self, symbols: &[Symbol], entry_rule: &str) -> Result<Self::Output, ParseFailure>;
}

impl<L: Lexer + ?Sized> Lexer for &L {
    fn tokenize(&self, text: &str) -> Result<Vec<Symbol>, LexFailure> {
        (**self).tokenize(text)
    }
}

impl<P: Parser + ?Sized> Parser for &P {
    type Output = P::Output;

    fn parse(&self, symbols: &[Symbol], entry_rule: &str) -> Result<Self::Output, ParseFailure> {
        (**self).parse(symbols, entry_rule)
    }
}

/// Stand-in for a capability the harness was built without.
///
/// Every call fails, naming the missing capability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unavailable;

impl Lexer for Unavailable {
    fn tokenize(&self, _text: &str) -> Result<Vec<Symbol>, LexFailure> {
        Err(LexFailure::new(0, "no lexer attached"))
    }
}

impl Parser for Unavailable {
    type Output = DerivationTree;

    fn parse(&self, _symbols: &[Symbol], entry_rule: &str) -> Result<Self::Output, ParseFailure> {
        Err(ParseFailure::new(entry_rule, "no parser attached"))
    }
}
