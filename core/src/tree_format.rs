//! Tree notation.
//!
//! ```text
//! tree         := '(' head child* ')'
//! head         := ruleName | '<' ruleName '>'
//! child        := tree | wildcard | leaf
//! wildcard     := '<' NAME '>'
//! leaf         := one item of the active SymbolFormatter
//! ```
//!
//! Token types start with an uppercase letter and rule names with a
//! lowercase one, which is how a child is told apart:
//!
//! - `(expr ...)` and `(<stat> ...)` are subtrees,
//! - `(ID 'x')`, `'='`, `EOF` or `[@0,...]` are leaves,
//! - `<ID>` and `<'='>` are token wildcards, `<expr>` a rule wildcard.
//!
//! A rule wildcard head ends the node: anything after it up to the matching
//! `)` documents intent only and is skipped.

use tracing::trace;

use crate::config::{ParseConfig, RecursionGuard};
use crate::cursor::Cursor;
use crate::error::{Error, SpecSyntaxError};
use crate::format::SymbolFormatter;
use crate::symbol::SymbolType;
use crate::traits::ToSpec;
use crate::tree::DerivationTree;

/// Parses and renders tree notation with an embedded token notation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeFormatter {
    symbols: SymbolFormatter,
    config: ParseConfig,
}

impl TreeFormatter {
    pub fn new(symbols: SymbolFormatter) -> Self {
        Self {
            symbols,
            config: ParseConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ParseConfig) -> Self {
        self.config = config;
        self
    }

    /// The notation used for leaves.
    pub fn symbol_formatter(&self) -> &SymbolFormatter {
        &self.symbols
    }

    pub fn set_symbol_formatter(&mut self, symbols: SymbolFormatter) {
        self.symbols = symbols;
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Parses a tree spec.
    ///
    /// Besides a parenthesized tree, the root may be a lone wildcard or leaf.
    pub fn parse(&self, spec: &str) -> Result<DerivationTree, Error> {
        let mut parser = TreeParser {
            symbols: &self.symbols,
            cur: Cursor::new(spec),
            depth: RecursionGuard::new(),
            limit: self.config.max_recursion_depth,
        };

        parser.cur.skip_whitespace();
        if parser.cur.is_eof() {
            return Err(parser.cur.error("expected a tree").into());
        }
        let tree = parser.child()?;
        parser.cur.skip_whitespace();
        if !parser.cur.is_eof() {
            return Err(parser.cur.error("unexpected input after tree").into());
        }
        trace!(nodes = tree.size(), "parsed tree spec");
        Ok(tree)
    }

    /// Single-line rendering.
    pub fn render(&self, tree: &DerivationTree) -> String {
        tree.to_spec(&self.symbols)
    }

    /// Indented multi-line rendering.
    pub fn render_pretty(&self, tree: &DerivationTree) -> String {
        tree.to_spec_pretty(&self.symbols)
    }
}

struct TreeParser<'f, 'a> {
    symbols: &'f SymbolFormatter,
    cur: Cursor<'a>,
    depth: RecursionGuard,
    limit: usize,
}

impl TreeParser<'_, '_> {
    fn child(&mut self) -> Result<DerivationTree, Error> {
        match self.cur.peek() {
            Some('(') if self.opens_subtree() => self.tree(),
            Some('<') => self.wildcard(),
            _ => Ok(DerivationTree::Leaf(self.symbols.parse_item(&mut self.cur)?)),
        }
    }

    /// At `(`: does a rule name or wildcard head follow?
    fn opens_subtree(&self) -> bool {
        let mut fork = self.cur.fork();
        fork.bump();
        fork.skip_whitespace();
        matches!(fork.peek(), Some(c) if c == '<' || c == '_' || c.is_lowercase())
    }

    fn tree(&mut self) -> Result<DerivationTree, Error> {
        let open = self.cur.pos();
        self.cur.expect('(')?;
        self.depth.enter(self.limit)?;
        self.cur.skip_whitespace();

        if self.cur.eat('<') {
            let name = self.rule_name()?;
            self.cur.skip_whitespace();
            self.cur.expect('>')?;
            self.skip_to_close(open)?;
            self.depth.exit();
            return Ok(DerivationTree::RuleWildcard(name));
        }

        let name = self.rule_name()?;
        let mut children = Vec::new();
        loop {
            self.cur.skip_whitespace();
            match self.cur.peek() {
                Some(')') => {
                    self.cur.bump();
                    break;
                }
                None => return Err(unbalanced(&self.cur, open).into()),
                Some(_) => children.push(self.child()?),
            }
        }
        self.depth.exit();
        Ok(DerivationTree::Rule { name, children })
    }

    fn rule_name(&mut self) -> Result<String, SpecSyntaxError> {
        self.cur.skip_whitespace();
        self.cur
            .identifier()
            .map(str::to_string)
            .ok_or_else(|| self.cur.error("expected a rule name"))
    }

    fn wildcard(&mut self) -> Result<DerivationTree, Error> {
        self.cur.expect('<')?;
        self.cur.skip_whitespace();
        let node = if self.cur.peek() == Some('\'') {
            DerivationTree::TokenWildcard(SymbolType::Literal(self.cur.quoted()?))
        } else {
            let name = self
                .cur
                .identifier()
                .ok_or_else(|| self.cur.error("expected a token type or rule name"))?;
            if name.starts_with(char::is_uppercase) {
                DerivationTree::TokenWildcard(SymbolType::named(name))
            } else {
                DerivationTree::RuleWildcard(name.to_string())
            }
        };
        self.cur.skip_whitespace();
        self.cur.expect('>')?;
        Ok(node)
    }

    /// Skips the illustration after a rule wildcard head, through the `)`
    /// closing the group opened at `open`.
    fn skip_to_close(&mut self, open: usize) -> Result<(), Error> {
        let mut depth = 1usize;
        loop {
            match self.cur.peek() {
                None => return Err(unbalanced(&self.cur, open).into()),
                Some('\'') => {
                    self.cur.quoted()?;
                }
                Some('(') => {
                    self.cur.bump();
                    depth += 1;
                }
                Some(')') => {
                    self.cur.bump();
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(_) => {
                    self.cur.bump();
                }
            }
        }
    }
}

fn unbalanced(cur: &Cursor<'_>, open: usize) -> SpecSyntaxError {
    cur.error_at(open, "unbalanced `(`: missing `)`")
}
