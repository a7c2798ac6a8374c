//! Assertion harness for grammar tests.

use tracing::{debug, error};

use gramcheck_core::{
    CompareConfig, DerivationTree, Error, Lexer, MatchResult, Matches, Parser, Symbol,
    SymbolProvider, ToSpec, TreeProvider, Unavailable,
};

/// Test oracle for one grammar.
///
/// Holds a [`SymbolProvider`] around the lexer and a [`TreeProvider`] around
/// the parser, and compares their output with expectations. A capability the
/// oracle was built without is [`Unavailable`].
///
/// # Example
///
/// ```ignore
/// let oracle = Oracle::for_grammar(ExpressionLexer, ExpressionParser);
///
/// oracle.assert_symbols(r"(ID 'x') '=' (INT '5') (NEWLINE '\n') EOF", "x = 5\n");
/// oracle.assert_parse("(expr (INT '10'))", "(INT '10')", "expr");
/// ```
#[derive(Debug, Clone)]
pub struct Oracle<L = Unavailable, P = Unavailable> {
    symbols: SymbolProvider<L>,
    trees: TreeProvider<P>,
    config: CompareConfig,
}

impl<L: Lexer, P: Parser> Oracle<L, P> {
    /// An oracle for a lexer and parser pair.
    pub fn for_grammar(lexer: L, parser: P) -> Self {
        Self {
            symbols: SymbolProvider::new(lexer),
            trees: TreeProvider::new(parser),
            config: CompareConfig::default(),
        }
    }

    pub fn symbol_provider(&self) -> &SymbolProvider<L> {
        &self.symbols
    }

    pub fn symbol_provider_mut(&mut self) -> &mut SymbolProvider<L> {
        &mut self.symbols
    }

    pub fn tree_provider(&self) -> &TreeProvider<P> {
        &self.trees
    }

    pub fn tree_provider_mut(&mut self) -> &mut TreeProvider<P> {
        &mut self.trees
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    pub fn with_config(mut self, config: CompareConfig) -> Self {
        self.config = config;
        self
    }

    /// Compares symbol lists without panicking.
    pub fn check_symbol_list(&self, expected: &[Symbol], actual: &[Symbol]) -> MatchResult<Symbol> {
        expected.matches(actual, &self.config)
    }

    /// Compares trees without panicking.
    pub fn check_tree(
        &self,
        expected: &DerivationTree,
        actual: &DerivationTree,
    ) -> MatchResult<DerivationTree> {
        expected.matches(actual, &self.config)
    }

    /// Panics with a failure report unless the lists match.
    #[track_caller]
    pub fn assert_symbol_list(&self, expected: &[Symbol], actual: &[Symbol]) {
        if let Err(mismatch) = self.check_symbol_list(expected, actual) {
            let formatter = self.symbols.formatter();
            fail(
                "symbol lists differ",
                mismatch.report(formatter),
                formatter.render(expected),
                formatter.render(actual),
            );
        }
    }

    /// Panics with a failure report unless the trees match.
    #[track_caller]
    pub fn assert_tree(&self, expected: &DerivationTree, actual: &DerivationTree) {
        if let Err(mismatch) = self.check_tree(expected, actual) {
            let formatter = self.trees.formatter().symbol_formatter();
            fail(
                "trees differ",
                mismatch.report(formatter),
                expected.to_spec_pretty(formatter),
                actual.to_spec_pretty(formatter),
            );
        }
    }

    /// Parses `spec`, tokenizes `input` and asserts the two lists match.
    #[track_caller]
    pub fn assert_symbols(&self, spec: &str, input: &str) {
        let expected = unwrap_or_fail("invalid symbol spec", self.symbols.from_spec(spec));
        let actual = unwrap_or_fail("lexer failed", self.symbols.from_input(input));
        self.assert_symbol_list(&expected, &actual);
    }

    /// Parses both specs, derives `entry_rule` from the symbols and asserts
    /// the result matches the tree spec.
    #[track_caller]
    pub fn assert_parse(&self, tree_spec: &str, symbols_spec: &str, entry_rule: &str) {
        debug!(entry_rule, "asserting parse");
        let expected = unwrap_or_fail("invalid tree spec", self.trees.from_spec(tree_spec));
        let notation = self.trees.formatter().symbol_formatter();
        let symbols = unwrap_or_fail(
            "invalid symbol spec",
            notation.parse_list(symbols_spec).map_err(Into::into),
        );
        let actual = unwrap_or_fail("parser failed", self.trees.from_input(&symbols, entry_rule));
        self.assert_tree(&expected, &actual);
    }
}

impl<L: Lexer> Oracle<L, Unavailable> {
    /// An oracle for a lexer alone.
    pub fn for_lexer(lexer: L) -> Self {
        Self::for_grammar(lexer, Unavailable)
    }
}

impl<P: Parser> Oracle<Unavailable, P> {
    /// An oracle for a parser alone.
    pub fn for_parser(parser: P) -> Self {
        Self::for_grammar(Unavailable, parser)
    }
}

#[track_caller]
#[allow(clippy::panic)]
fn unwrap_or_fail<T>(context: &str, result: Result<T, Error>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            error!(%err, "{context}");
            panic!("{context}: {err}")
        }
    }
}

#[track_caller]
#[allow(clippy::panic)]
fn fail(title: &str, report: String, expected: String, actual: String) -> ! {
    error!(%report, "{title}");
    panic!("{title}\n{report}\n\nexpected:\n{expected}\n\nactual:\n{actual}")
}
