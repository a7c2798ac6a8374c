//! Oracle assertions against a small hand-written grammar:
//!
//! ```text
//! sum: INT ('+' INT)*
//! ```
use gramcheck::{
    CompareConfig, DerivationTree, LexFailure, Lexer, MismatchReason, Oracle, ParseFailure, Parser,
    PositionMode, Span, Symbol, SymbolFormatter,
};
use test_case::test_case;

struct SumLexer;

impl Lexer for SumLexer {
    fn tokenize(&self, text: &str) -> Result<Vec<Symbol>, LexFailure> {
        let mut symbols = Vec::new();
        let mut chars = text.char_indices().peekable();
        while let Some((start, c)) = chars.next() {
            let symbol = match c {
                ' ' => continue,
                '+' => Symbol::literal("+"),
                '0'..='9' => {
                    let mut end = start + 1;
                    while let Some(&(i, '0'..='9')) = chars.peek() {
                        end = i + 1;
                        chars.next();
                    }
                    Symbol::named("INT", &text[start..end])
                }
                other => return Err(LexFailure::new(start, format!("unexpected `{other}`"))),
            };
            let len = symbol.text().len();
            let index = symbols.len();
            symbols.push(
                symbol
                    .with_index(index)
                    .with_span(Span::new(start, start + len))
                    .with_position(1, start)
                    .with_channel(0),
            );
        }
        let index = symbols.len();
        symbols.push(
            Symbol::eof()
                .with_index(index)
                .with_span(Span::new(text.len(), text.len()))
                .with_position(1, text.len())
                .with_channel(0),
        );
        Ok(symbols)
    }
}

struct SumParser;

impl Parser for SumParser {
    type Output = DerivationTree;

    fn parse(&self, symbols: &[Symbol], entry_rule: &str) -> Result<Self::Output, ParseFailure> {
        if entry_rule != "sum" {
            return Err(ParseFailure::new(entry_rule, "unknown rule"));
        }
        let mut children = Vec::new();
        let mut expect_int = true;
        for symbol in symbols.iter().filter(|s| !s.is_eof()) {
            let ok = if expect_int {
                symbol.kind().symbolic_name() == Some("INT")
            } else {
                symbol.text() == "+"
            };
            if !ok {
                return Err(ParseFailure::new(
                    entry_rule,
                    format!("mismatched input '{}'", symbol.text()),
                ));
            }
            expect_int = !expect_int;
            children.push(DerivationTree::leaf(symbol.clone()));
        }
        if expect_int {
            return Err(ParseFailure::new(entry_rule, "missing INT"));
        }
        Ok(DerivationTree::rule("sum", children))
    }
}

fn oracle() -> Oracle<SumLexer, SumParser> {
    Oracle::for_grammar(SumLexer, SumParser)
}

#[test]
fn test_assert_symbols() {
    oracle().assert_symbols("(INT '1') '+' (INT '22') EOF", "1 + 22");
}

#[test]
fn test_assert_symbols_verbose() {
    let mut oracle = oracle();
    oracle
        .symbol_provider_mut()
        .set_formatter(SymbolFormatter::Verbose);
    oracle.assert_symbols(
        "[@0,0:0='1',<INT>,1:0]\n[@1,1:1='+',<'+'>,1:1]\n[@2,2:1='<EOF>',<EOF>,1:2]",
        "1+",
    );
}

#[test]
fn test_assert_parse() {
    oracle().assert_parse("(sum (INT '1') '+' (INT '2'))", "(INT '1') '+' (INT '2') EOF", "sum");
}

#[test]
fn test_assert_parse_with_token_wildcards() {
    oracle().assert_parse("(sum <INT> <'+'> <INT>)", "(INT '7') '+' (INT '8')", "sum");
}

#[test]
fn test_lexer_output_feeds_parser() {
    let oracle = oracle();
    let symbols = oracle.symbol_provider().from_input("3 + 4").unwrap();
    let actual = oracle.tree_provider().from_input(&symbols, "sum").unwrap();
    let expected = oracle
        .tree_provider()
        .from_spec("(sum (INT '3') '+' (INT '4'))")
        .unwrap();
    oracle.assert_tree(&expected, &actual);
}

#[test]
fn test_check_symbol_list_reports_mismatch() {
    let oracle = oracle();
    let provider = oracle.symbol_provider();
    let expected = provider.from_spec("(INT '1') '+' (INT '3') EOF").unwrap();
    let actual = provider.from_input("1 + 2").unwrap();

    let mismatch = oracle.check_symbol_list(&expected, &actual).unwrap_err();
    assert_eq!(mismatch.path, vec![2]);
    assert_eq!(mismatch.reason, MismatchReason::SymbolText);
}

#[test]
fn test_with_config_always_compares_positions() {
    let oracle = oracle().with_config(CompareConfig::new().with_positions(PositionMode::Always));
    let provider = oracle.symbol_provider();
    let expected = provider.from_spec("(INT '1') EOF").unwrap();
    let actual = provider.from_input("1").unwrap();
    assert!(oracle.check_symbol_list(&expected, &actual).is_err());
    assert_eq!(oracle.config().positions, PositionMode::Always);
}

#[test]
#[should_panic(expected = "symbol lists differ")]
fn test_assert_symbols_panics_on_mismatch() {
    oracle().assert_symbols("(INT '1') EOF", "2");
}

#[test]
#[should_panic(expected = "mismatch at [1]: rule names differ")]
fn test_assert_tree_panics_with_path() {
    let oracle = oracle();
    let provider = oracle.tree_provider();
    let expected = provider.from_spec("(sum (expr) <sum>)").unwrap();
    let actual = provider.from_spec("(sum (expr) (stat))").unwrap();
    oracle.assert_tree(&expected, &actual);
}

#[test_case("(sum", "(INT '1')", "sum", "invalid tree spec"; "bad tree spec")]
#[test_case("(sum)", "(INT", "sum", "invalid symbol spec"; "bad symbol spec")]
#[test_case("(sum)", "'+'", "sum", "parser failed: cannot derive `sum`: mismatched input '+'"; "parse failure")]
#[test_case("(sum)", "(INT '1')", "stat", "parser failed: cannot derive `stat`: unknown rule"; "unknown rule")]
fn test_assert_parse_failures(tree_spec: &str, symbols_spec: &str, rule: &str, message: &str) {
    let result = std::panic::catch_unwind(|| oracle().assert_parse(tree_spec, symbols_spec, rule));
    let payload = result.unwrap_err();
    let text = payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default();
    assert!(text.starts_with(message), "unexpected panic message: {text}");
}

#[test]
fn test_failure_report() {
    let oracle = oracle();
    let result = std::panic::catch_unwind(|| oracle.assert_symbols("(INT '1') '+' EOF", "1 + 2"));
    let payload = result.unwrap_err();
    let text = payload.downcast_ref::<String>().cloned().unwrap_or_default();
    insta::assert_snapshot!(text, @r"
    symbol lists differ
    mismatch at [2]: token types differ
      expected: EOF
      actual:   (INT '2')

    expected:
    (INT '1') '+' EOF

    actual:
    (INT '1') '+' (INT '2') EOF
    ");
}

#[test]
fn test_lexer_only_oracle_rejects_parse() {
    let oracle = Oracle::for_lexer(SumLexer);
    oracle.assert_symbols("(INT '5') EOF", "5");
    assert!(oracle
        .tree_provider()
        .from_input(&[Symbol::eof()], "sum")
        .is_err());
}

#[test]
fn test_parser_only_oracle_rejects_input() {
    let oracle = Oracle::for_parser(SumParser);
    oracle.assert_parse("(sum (INT '5'))", "(INT '5')", "sum");
    let err = oracle.symbol_provider().from_input("5").unwrap_err();
    assert_eq!(err.to_string(), "lexing failed at offset 0: no lexer attached");
}
