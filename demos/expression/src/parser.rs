//! Recursive descent parser producing derivation trees.
//!
//! Binary expressions use precedence climbing; every operator application
//! becomes an `expr` node holding the left operand, the operator token and
//! the right operand, so `1 + 2 * 3` derives as
//! `(expr (expr (INT '1')) '+' (expr (expr (INT '2')) '*' (expr (INT '3'))))`.

use gramcheck::{DerivationTree, ParseFailure, Parser, Symbol, SymbolType};
use tracing::{debug, trace};

use crate::ExprError;

/// Rules of the expression grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Prog,
    Stat,
    Expr,
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Self::Prog => "prog",
            Self::Stat => "stat",
            Self::Expr => "expr",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "prog" => Self::Prog,
            "stat" => Self::Stat,
            "expr" => Self::Expr,
            _ => return None,
        })
    }
}

/// The parser's native tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Rule { rule: Rule, children: Vec<Node> },
    Token(Symbol),
}

impl Node {
    fn rule(rule: Rule, children: Vec<Node>) -> Self {
        Self::Rule { rule, children }
    }
}

impl From<Node> for DerivationTree {
    fn from(node: Node) -> Self {
        match node {
            Node::Rule { rule, children } => DerivationTree::rule(
                rule.name(),
                children.into_iter().map(Into::into).collect(),
            ),
            Node::Token(symbol) => DerivationTree::leaf(symbol),
        }
    }
}

/// Parser for the expression grammar.
///
/// Any rule can be the entry rule. Every symbol must be consumed except a
/// trailing EOF, which only `prog` consumes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionParser;

impl ExpressionParser {
    /// Parses with the grammar's own error type.
    pub fn parse_rule(&self, symbols: &[Symbol], rule: Rule) -> Result<Node, ExprError> {
        let mut input = Input { symbols, pos: 0 };
        let node = match rule {
            Rule::Prog => input.prog()?,
            Rule::Stat => input.stat()?,
            Rule::Expr => input.expr(0)?,
        };
        input.ensure_consumed()?;
        Ok(node)
    }
}

impl Parser for ExpressionParser {
    type Output = Node;

    fn parse(&self, symbols: &[Symbol], entry_rule: &str) -> Result<Node, ParseFailure> {
        let result = Rule::from_name(entry_rule)
            .ok_or_else(|| ExprError::UnknownRule(entry_rule.to_string()))
            .and_then(|rule| self.parse_rule(symbols, rule));
        result.map_err(|err| {
            debug!(entry_rule, %err, "parse failed");
            ParseFailure::new(entry_rule, err.to_string())
        })
    }
}

struct Input<'s> {
    symbols: &'s [Symbol],
    pos: usize,
}

impl Input<'_> {
    fn peek(&self) -> Option<&Symbol> {
        self.symbols.get(self.pos)
    }

    fn peek_nth(&self, n: usize) -> Option<&Symbol> {
        self.symbols.get(self.pos + n)
    }

    fn at(&self, name: &str) -> bool {
        self.peek()
            .is_some_and(|s| s.kind().symbolic_name() == Some(name))
    }

    fn at_literal(&self, lit: &str) -> bool {
        self.peek().is_some_and(|s| is_literal(s, lit))
    }

    fn bump(&mut self) -> Option<Node> {
        let symbol = self.peek()?.clone();
        self.pos += 1;
        Some(Node::Token(symbol))
    }

    /// Consumes the next symbol if `accept` holds for it.
    fn expect(
        &mut self,
        expect: &'static str,
        accept: impl Fn(&Symbol) -> bool,
    ) -> Result<Node, ExprError> {
        let Some(symbol) = self.peek() else {
            return Err(ExprError::Missing { expect });
        };
        if !accept(symbol) {
            return Err(ExprError::Mismatched {
                expect,
                found: symbol.text().to_string(),
            });
        }
        self.bump().ok_or(ExprError::Missing { expect })
    }

    fn expect_named(&mut self, name: &'static str) -> Result<Node, ExprError> {
        self.expect(name, |s| s.kind().symbolic_name() == Some(name))
    }

    fn ensure_consumed(&self) -> Result<(), ExprError> {
        match self.peek() {
            None => Ok(()),
            Some(symbol) if symbol.is_eof() && self.pos + 1 == self.symbols.len() => Ok(()),
            Some(symbol) => Err(ExprError::Extraneous(symbol.text().to_string())),
        }
    }

    fn prog(&mut self) -> Result<Node, ExprError> {
        let mut children = vec![self.stat()?];
        while self.peek().is_some_and(|s| !s.is_eof()) {
            children.push(self.stat()?);
        }
        children.push(self.expect("<EOF>", Symbol::is_eof)?);
        Ok(Node::rule(Rule::Prog, children))
    }

    fn stat(&mut self) -> Result<Node, ExprError> {
        let children = if self.at("NEWLINE") {
            vec![self.expect_named("NEWLINE")?]
        } else if self.at("ID") && self.peek_nth(1).is_some_and(|s| is_literal(s, "=")) {
            let id = self.expect_named("ID")?;
            let assign = self.expect("'='", |s| is_literal(s, "="))?;
            let value = self.expr(0)?;
            vec![id, assign, value, self.expect_named("NEWLINE")?]
        } else {
            let value = self.expr(0)?;
            vec![value, self.expect_named("NEWLINE")?]
        };
        trace!(pos = self.pos, "parsed stat");
        Ok(Node::rule(Rule::Stat, children))
    }

    /// Parses operators binding at least as tight as `min_prec`.
    fn expr(&mut self, min_prec: u8) -> Result<Node, ExprError> {
        let mut lhs = self.primary()?;
        while let Some(prec) = self.peek().and_then(binary_precedence) {
            if prec < min_prec {
                break;
            }
            let op = self.bump().ok_or(ExprError::Missing { expect: "operator" })?;
            let rhs = self.expr(prec + 1)?;
            lhs = Node::rule(Rule::Expr, vec![lhs, op, rhs]);
        }
        Ok(lhs)
    }

    fn primary(&mut self) -> Result<Node, ExprError> {
        let children = if self.at("INT") || self.at("ID") {
            vec![self.bump().ok_or(ExprError::Missing { expect: "expr" })?]
        } else if self.at_literal("(") {
            let open = self.expect("'('", |s| is_literal(s, "("))?;
            let inner = self.expr(0)?;
            let close = self.expect("')'", |s| is_literal(s, ")"))?;
            vec![open, inner, close]
        } else {
            return Err(match self.peek() {
                Some(symbol) => ExprError::NoViableAlternative(symbol.text().to_string()),
                None => ExprError::Missing { expect: "expr" },
            });
        };
        Ok(Node::rule(Rule::Expr, children))
    }
}

fn is_literal(symbol: &Symbol, lit: &str) -> bool {
    matches!(symbol.kind(), SymbolType::Literal(l) if l == lit)
}

fn binary_precedence(symbol: &Symbol) -> Option<u8> {
    match symbol.kind() {
        SymbolType::Literal(l) if l == "*" || l == "/" => Some(2),
        SymbolType::Literal(l) if l == "+" || l == "-" => Some(1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gramcheck::SymbolFormatter;
    use test_case::test_case;

    fn parse(symbols: &str, rule: &str) -> Result<DerivationTree, ParseFailure> {
        let symbols = SymbolFormatter::Default.parse_list(symbols).unwrap();
        ExpressionParser.parse(&symbols, rule).map(Into::into)
    }

    #[test_case("(INT '1') '-' (INT '2') '-' (INT '3')",
        "(expr (expr (expr (INT '1')) '-' (expr (INT '2'))) '-' (expr (INT '3')))";
        "left associative")]
    #[test_case("(INT '1') '+' (INT '2') '*' (INT '3')",
        "(expr (expr (INT '1')) '+' (expr (expr (INT '2')) '*' (expr (INT '3'))))";
        "product binds tighter")]
    #[test_case("'(' (INT '1') '+' (INT '2') ')' '/' (INT '3')",
        "(expr (expr '(' (expr (expr (INT '1')) '+' (expr (INT '2'))) ')') '/' (expr (INT '3')))";
        "parentheses")]
    fn test_expr_shape(symbols: &str, tree: &str) {
        assert_eq!(parse(symbols, "expr").unwrap().to_string(), tree);
    }

    #[test_case("(INT '1') '+'", "expr", "missing expr at end of input"; "dangling operator")]
    #[test_case("'+' (INT '1')", "expr", "no viable alternative at input '+'"; "leading operator")]
    #[test_case("'(' (INT '1') EOF", "expr", "mismatched input '<EOF>' expecting ')'"; "unclosed paren")]
    #[test_case("(INT '1') (INT '2')", "expr", "extraneous input '2' expecting <EOF>"; "trailing symbol")]
    #[test_case("(ID 'x') '=' (INT '1')", "stat", "missing NEWLINE at end of input"; "missing newline")]
    #[test_case("EOF", "prog", "no viable alternative at input '<EOF>'"; "empty prog")]
    #[test_case("(INT '1')", "atom", "unknown rule `atom`"; "unknown rule")]
    fn test_parse_errors(symbols: &str, rule: &str, message: &str) {
        let err = parse(symbols, rule).unwrap_err();
        assert_eq!(err.entry_rule, rule);
        assert_eq!(err.message, message);
    }

    #[test]
    fn test_eof_only_consumed_by_prog() {
        assert!(parse("(INT '1') EOF", "expr").is_ok());
        assert!(parse("(INT '1') EOF EOF", "expr").is_err());
        let prog = parse("(NEWLINE '\\n') EOF", "prog").unwrap();
        assert_eq!(prog.to_string(), r"(prog (stat (NEWLINE '\n')) EOF)");
    }

    #[test]
    fn test_rule_names_round_trip() {
        for rule in [Rule::Prog, Rule::Stat, Rule::Expr] {
            assert_eq!(Rule::from_name(rule.name()), Some(rule));
        }
    }
}
