//! Derivation trees.

use core::fmt;

use crate::format::SymbolFormatter;
use crate::symbol::{Symbol, SymbolType};
use crate::traits::{Printer, ToSpec};

/// A parse result, or an expectation of one.
///
/// Trees built by a parser only contain [`Rule`](Self::Rule) and
/// [`Leaf`](Self::Leaf) nodes. The wildcard variants come from tree specs
/// and stand for any subtree or leaf of the named kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DerivationTree {
    /// An application of a grammar rule; child order is derivation order.
    Rule {
        name: String,
        children: Vec<DerivationTree>,
    },
    /// A consumed token.
    Leaf(Symbol),
    /// Any rule node named `0`, whatever its children.
    RuleWildcard(String),
    /// Any leaf of type `0`, whatever its text.
    TokenWildcard(SymbolType),
}

impl DerivationTree {
    pub fn rule(name: impl Into<String>, children: Vec<DerivationTree>) -> Self {
        Self::Rule {
            name: name.into(),
            children,
        }
    }

    pub fn leaf(symbol: Symbol) -> Self {
        Self::Leaf(symbol)
    }

    pub fn rule_wildcard(name: impl Into<String>) -> Self {
        Self::RuleWildcard(name.into())
    }

    pub fn token_wildcard(kind: SymbolType) -> Self {
        Self::TokenWildcard(kind)
    }

    /// The rule name of rule nodes and rule wildcards.
    pub fn rule_name(&self) -> Option<&str> {
        match self {
            Self::Rule { name, .. } | Self::RuleWildcard(name) => Some(name),
            _ => None,
        }
    }

    /// The symbol of a leaf.
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Leaf(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Children of a rule node; empty for every other node.
    pub fn children(&self) -> &[DerivationTree] {
        match self {
            Self::Rule { children, .. } => children,
            _ => &[],
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::RuleWildcard(_) | Self::TokenWildcard(_))
    }

    /// True if this node or any descendant is a wildcard.
    pub fn contains_wildcard(&self) -> bool {
        self.is_wildcard() || self.children().iter().any(Self::contains_wildcard)
    }

    /// The node reached by following child indices from this one.
    pub fn get(&self, path: &[usize]) -> Option<&DerivationTree> {
        path.iter()
            .try_fold(self, |node, &idx| node.children().get(idx))
    }

    /// Leaf symbols in left-to-right order.
    pub fn leaves(&self) -> Vec<&Symbol> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Symbol>) {
        match self {
            Self::Leaf(symbol) => out.push(symbol),
            _ => {
                for child in self.children() {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Number of nodes, wildcards counting as one.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(Self::size).sum::<usize>()
    }
}

impl ToSpec for DerivationTree {
    fn write<P: Printer>(&self, p: &mut P) {
        match self {
            Self::Leaf(symbol) => p.symbol(symbol),
            Self::RuleWildcard(name) => {
                p.char('<');
                p.word(name);
                p.char('>');
            }
            Self::TokenWildcard(kind) => {
                p.char('<');
                p.word(&kind.to_string());
                p.char('>');
            }
            Self::Rule { name, children } => {
                p.char('(');
                p.word(name);
                let nested = children.iter().any(|c| matches!(c, Self::Rule { .. }));
                if p.is_pretty() && nested {
                    p.indent();
                    for child in children {
                        p.newline();
                        p.write(child);
                    }
                    p.dedent();
                    p.newline();
                } else {
                    for child in children {
                        p.space();
                        p.write(child);
                    }
                }
                p.char(')');
            }
        }
    }
}

impl fmt::Display for DerivationTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_spec(&SymbolFormatter::Default))
    }
}
