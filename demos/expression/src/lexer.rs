//! Tokens and the lexer.

use gramcheck::{LexFailure, Lexer, Span, Symbol};
use logos::Logos;
use tracing::trace;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
pub enum Token {
    #[regex(r"[a-zA-Z]+")]
    Id,

    #[regex(r"-?[0-9]+")]
    Int,

    #[regex(r"\r?\n")]
    Newline,

    #[token("=")]
    Assign,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,
}

impl Token {
    /// The symbolic type name, `None` for anonymous literal tokens.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::Id => Some("ID"),
            Self::Int => Some("INT"),
            Self::Newline => Some("NEWLINE"),
            _ => None,
        }
    }

    fn symbol(self, text: &str) -> Symbol {
        match self.name() {
            Some(name) => Symbol::named(name, text),
            None => Symbol::literal(text),
        }
    }
}

/// Start offsets of each line, for offset to line/column conversion.
struct LineIndex<'a> {
    text: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(text: &'a str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, starts }
    }

    /// 1-based line and 0-based column (in characters) of `offset`.
    fn position(&self, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|&start| start <= offset);
        let line_start = self.starts[line - 1];
        let column = self.text[line_start..offset].chars().count();
        (line, column)
    }
}

/// Lexer for the expression grammar.
///
/// Produces symbols with byte offsets, consecutive indices and the default
/// channel, followed by an EOF symbol.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionLexer;

impl Lexer for ExpressionLexer {
    fn tokenize(&self, text: &str) -> Result<Vec<Symbol>, LexFailure> {
        let lines = LineIndex::new(text);
        let mut symbols = Vec::new();

        for (token, range) in Token::lexer(text).spanned() {
            let slice = &text[range.clone()];
            let token = token.map_err(|()| {
                LexFailure::new(range.start, format!("token recognition error at: '{slice}'"))
            })?;
            let (line, column) = lines.position(range.start);
            symbols.push(
                token
                    .symbol(slice)
                    .with_index(symbols.len())
                    .with_span(Span::new(range.start, range.end))
                    .with_position(line, column)
                    .with_channel(0),
            );
        }

        let (line, column) = lines.position(text.len());
        symbols.push(
            Symbol::eof()
                .with_index(symbols.len())
                .with_span(Span::new(text.len(), text.len()))
                .with_position(line, column)
                .with_channel(0),
        );
        trace!(count = symbols.len(), "lexed expression input");
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gramcheck::SymbolType;

    fn kinds(text: &str) -> Vec<SymbolType> {
        ExpressionLexer
            .tokenize(text)
            .unwrap()
            .into_iter()
            .map(|s| s.kind().clone())
            .collect()
    }

    #[test]
    fn test_lex_operators() {
        assert_eq!(
            kinds("a*(b/c)"),
            vec![
                SymbolType::named("ID"),
                SymbolType::literal("*"),
                SymbolType::literal("("),
                SymbolType::named("ID"),
                SymbolType::literal("/"),
                SymbolType::named("ID"),
                SymbolType::literal(")"),
                SymbolType::eof(),
            ]
        );
    }

    #[test]
    fn test_negative_int_and_minus() {
        let symbols = ExpressionLexer.tokenize("15 -10 - 2").unwrap();
        let texts: Vec<_> = symbols.iter().map(Symbol::text).collect();
        assert_eq!(texts, ["15", "-10", "-", "2", "<EOF>"]);
    }

    #[test]
    fn test_empty_input_is_eof() {
        let symbols = ExpressionLexer.tokenize("").unwrap();
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].span(), Some(Span::new(0, 0)));
        assert_eq!(symbols[0].line(), Some(1));
    }

    #[test]
    fn test_positions_after_crlf() {
        let symbols = ExpressionLexer.tokenize("a\r\n  b").unwrap();
        assert_eq!(symbols[2].text(), "b");
        assert_eq!(symbols[2].line(), Some(2));
        assert_eq!(symbols[2].column(), Some(2));
        assert_eq!(symbols[2].index(), Some(2));
    }

    #[test]
    fn test_unknown_character() {
        let err = ExpressionLexer.tokenize("x = $").unwrap_err();
        assert_eq!(err.offset, 4);
        assert_eq!(err.message, "token recognition error at: '$'");
    }
}
