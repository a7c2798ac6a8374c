//! The default notation: `(ID 'x') '=' (INT '5') EOF`.

use crate::cursor::Cursor;
use crate::error::SpecSyntaxError;
use crate::symbol::{EOF_TEXT, Symbol, SymbolType, escape_text};

pub(super) fn parse_item(cur: &mut Cursor<'_>) -> Result<Symbol, SpecSyntaxError> {
    match cur.peek() {
        Some('(') => {
            cur.bump();
            cur.skip_whitespace();
            let kind = parse_type(cur)?;
            cur.skip_whitespace();
            let text = cur.quoted()?;
            cur.skip_whitespace();
            cur.expect(')')?;
            Ok(Symbol::new(kind, text))
        }
        Some('\'') => cur.quoted().map(Symbol::literal),
        _ => {
            let start = cur.pos();
            match cur.identifier() {
                Some(name) => Ok(bare(name)),
                None => Err(cur.error_at(start, "expected a token item")),
            }
        }
    }
}

fn parse_type(cur: &mut Cursor<'_>) -> Result<SymbolType, SpecSyntaxError> {
    if cur.peek() == Some('\'') {
        return cur.quoted().map(SymbolType::Literal);
    }
    cur.identifier()
        .map(SymbolType::named)
        .ok_or_else(|| cur.error("expected a token type"))
}

fn bare(name: &str) -> Symbol {
    let kind = SymbolType::named(name);
    if kind.is_eof() {
        Symbol::new(kind, EOF_TEXT)
    } else {
        Symbol::new(kind, "")
    }
}

pub(super) fn render_item(symbol: &Symbol) -> String {
    match symbol.kind() {
        kind if kind.is_eof() && symbol.text() == EOF_TEXT => kind.to_string(),
        SymbolType::Literal(lit) if lit == symbol.text() => symbol.kind().to_string(),
        SymbolType::Named(name) if symbol.text().is_empty() && !symbol.is_eof() => name.clone(),
        kind => format!("({} '{}')", kind, escape_text(symbol.text())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SymbolFormatter;
    use test_case::test_case;

    fn parse(spec: &str) -> Result<Vec<Symbol>, SpecSyntaxError> {
        SymbolFormatter::Default.parse_list(spec)
    }

    #[test]
    fn test_assignment_spec() {
        let symbols = parse(r"(ID 'x') '=' (INT '5') (NEWLINE '\n') EOF").unwrap();
        assert_eq!(
            symbols,
            vec![
                Symbol::named("ID", "x"),
                Symbol::literal("="),
                Symbol::named("INT", "5"),
                Symbol::named("NEWLINE", "\n"),
                Symbol::eof(),
            ]
        );
    }

    #[test]
    fn test_multiline_and_padding() {
        let symbols = parse("\n  ( ID   'myVariable' )\n\t(ID 'y')\n  EOF\n").unwrap();
        assert_eq!(symbols.len(), 3);
        assert_eq!(symbols[0], Symbol::named("ID", "myVariable"));
    }

    #[test]
    fn test_bare_type_has_empty_text() {
        assert_eq!(parse("INDENT").unwrap(), vec![Symbol::named("INDENT", "")]);
    }

    #[test]
    fn test_literal_type_in_parens() {
        let symbols = parse("('=' '=')").unwrap();
        assert_eq!(symbols, vec![Symbol::literal("=")]);
    }

    #[test]
    fn test_crlf_text() {
        let symbols = parse(r"(NEWLINE '\r\n')").unwrap();
        assert_eq!(symbols[0].text(), "\r\n");
    }

    #[test_case("(ID x)", 4, "expected `'`"; "unquoted text")]
    #[test_case("(ID 'x'", 7, "expected `)`"; "unclosed paren")]
    #[test_case("(ID 'x') ]", 9, "expected a token item"; "stray bracket")]
    #[test_case("( 'x')", 5, "expected `'`"; "missing text")]
    #[test_case("(5 'x')", 1, "expected a token type"; "numeric type")]
    fn test_syntax_errors(spec: &str, offset: usize, message: &str) {
        let err = parse(spec).unwrap_err();
        assert_eq!(err.offset, offset);
        assert_eq!(err.message, message);
    }

    #[test]
    fn test_empty_text_renders_bare() {
        let symbols = parse("INDENT (ID '') EOF").unwrap();
        assert_eq!(SymbolFormatter::Default.render(&symbols), "INDENT ID EOF");
        assert_eq!(render_item(&Symbol::named("EOF", "")), "(EOF '')");
    }

    #[test]
    fn test_render_item_forms() {
        assert_eq!(render_item(&Symbol::named("ID", "it's")), r"(ID 'it\'s')");
        assert_eq!(render_item(&Symbol::named("EOF", "end")), "(EOF 'end')");
        assert_eq!(
            render_item(&Symbol::new(SymbolType::literal("+"), "plus")),
            "('+' 'plus')"
        );
    }
}
