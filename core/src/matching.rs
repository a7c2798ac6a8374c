//! Structural comparison of expected and actual values.
//!
//! A comparison stops at the first divergence and reports it as a
//! [`Mismatch`]: where it is, what each side holds there, and why they
//! differ. Expected trees may contain wildcards; actual trees may not.

use core::fmt;

use tracing::{debug, trace};

use crate::config::{CompareConfig, PositionMode};
use crate::format::SymbolFormatter;
use crate::symbol::Symbol;
use crate::traits::ToSpec;
use crate::tree::DerivationTree;

/// `Ok` when the values match.
pub type MatchResult<V> = Result<(), Mismatch<V>>;

/// A symbol position field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionField {
    Index,
    Start,
    Stop,
    Line,
    Column,
    Channel,
}

impl PositionField {
    const ALL: [Self; 6] = [
        Self::Index,
        Self::Start,
        Self::Stop,
        Self::Line,
        Self::Column,
        Self::Channel,
    ];

    fn get(self, symbol: &Symbol) -> Option<i64> {
        let value = match self {
            Self::Index => symbol.index(),
            Self::Start => symbol.start(),
            Self::Stop => {
                return symbol
                    .end()
                    .and_then(|end| i64::try_from(end).ok())
                    .map(|end| end - 1);
            }
            Self::Line => symbol.line(),
            Self::Column => symbol.column(),
            Self::Channel => symbol.channel(),
        };
        value.and_then(|v| i64::try_from(v).ok())
    }
}

impl fmt::Display for PositionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Index => "index",
            Self::Start => "start offset",
            Self::Stop => "stop offset",
            Self::Line => "line",
            Self::Column => "column",
            Self::Channel => "channel",
        })
    }
}

/// Why two values differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchReason {
    /// A rule node where a leaf was expected, or the reverse.
    NodeKind,
    RuleName,
    ChildCount { expected: usize, actual: usize },
    SymbolType,
    SymbolText,
    Position(PositionField),
    /// The sequences agree up to the shorter one's end.
    Length { expected: usize, actual: usize },
    /// Actual trees come from a parser and never hold wildcards.
    WildcardInActual,
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeKind => f.write_str("node kinds differ"),
            Self::RuleName => f.write_str("rule names differ"),
            Self::ChildCount { expected, actual } => {
                write!(f, "expected {expected} children, found {actual}")
            }
            Self::SymbolType => f.write_str("token types differ"),
            Self::SymbolText => f.write_str("token texts differ"),
            Self::Position(field) => write!(f, "token {field} differs"),
            Self::Length { expected, actual } => {
                write!(f, "expected {expected} symbols, found {actual}")
            }
            Self::WildcardInActual => f.write_str("actual tree contains a wildcard"),
        }
    }
}

/// The first divergence between an expected and an actual value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch<V> {
    /// Sequence index, or child indices from the tree root.
    pub path: Vec<usize>,
    /// The expected value at `path`; `None` past the end of a sequence.
    pub expected: Option<V>,
    /// The actual value at `path`; `None` past the end of a sequence.
    pub actual: Option<V>,
    pub reason: MismatchReason,
}

impl<V> Mismatch<V> {
    fn new(path: Vec<usize>, expected: Option<V>, actual: Option<V>, reason: MismatchReason) -> Self {
        Self {
            path,
            expected,
            actual,
            reason,
        }
    }
}

impl<V: ToSpec> Mismatch<V> {
    /// A failure report with both sides rendered in `formatter`'s notation.
    pub fn report(&self, formatter: &SymbolFormatter) -> String {
        let render = |value: &Option<V>| {
            value
                .as_ref()
                .map_or_else(|| "<nothing>".to_string(), |v| v.to_spec(formatter))
        };
        let at = if self.path.is_empty() {
            "root".to_string()
        } else {
            format!("{:?}", self.path)
        };
        format!(
            "mismatch at {at}: {}\n  expected: {}\n  actual:   {}",
            self.reason,
            render(&self.expected),
            render(&self.actual)
        )
    }
}

impl<V: ToSpec> fmt::Display for Mismatch<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report(&SymbolFormatter::Default))
    }
}

/// Comparison of an expected value against an actual one.
pub trait Matches {
    /// The value type a mismatch reports.
    type Item;

    fn matches(&self, actual: &Self, config: &CompareConfig) -> MatchResult<Self::Item>;
}

impl Matches for Symbol {
    type Item = Symbol;

    fn matches(&self, actual: &Self, config: &CompareConfig) -> MatchResult<Symbol> {
        match compare_symbols(self, actual, config) {
            None => Ok(()),
            Some(reason) => Err(Mismatch::new(
                Vec::new(),
                Some(self.clone()),
                Some(actual.clone()),
                reason,
            )),
        }
    }
}

impl Matches for [Symbol] {
    type Item = Symbol;

    fn matches(&self, actual: &Self, config: &CompareConfig) -> MatchResult<Symbol> {
        trace!(expected = self.len(), actual = actual.len(), "comparing symbols");
        for (i, (exp, act)) in self.iter().zip(actual).enumerate() {
            if let Some(reason) = compare_symbols(exp, act, config) {
                debug!(index = i, %reason, "symbol mismatch");
                return Err(Mismatch::new(
                    vec![i],
                    Some(exp.clone()),
                    Some(act.clone()),
                    reason,
                ));
            }
        }
        if self.len() != actual.len() {
            let at = self.len().min(actual.len());
            let reason = MismatchReason::Length {
                expected: self.len(),
                actual: actual.len(),
            };
            debug!(index = at, %reason, "symbol mismatch");
            return Err(Mismatch::new(
                vec![at],
                self.get(at).cloned(),
                actual.get(at).cloned(),
                reason,
            ));
        }
        Ok(())
    }
}

impl Matches for DerivationTree {
    type Item = DerivationTree;

    fn matches(&self, actual: &Self, config: &CompareConfig) -> MatchResult<DerivationTree> {
        trace!(expected = self.size(), actual = actual.size(), "comparing trees");
        let mut path = Vec::new();
        match compare_trees(self, actual, config, &mut path) {
            None => Ok(()),
            Some(reason) => {
                debug!(?path, %reason, "tree mismatch");
                Err(Mismatch::new(
                    path.clone(),
                    self.get(&path).cloned(),
                    actual.get(&path).cloned(),
                    reason,
                ))
            }
        }
    }
}

/// Compares one node pair, leaving `path` pointing at the divergence.
fn compare_trees(
    expected: &DerivationTree,
    actual: &DerivationTree,
    config: &CompareConfig,
    path: &mut Vec<usize>,
) -> Option<MismatchReason> {
    use DerivationTree::*;

    match (expected, actual) {
        (_, RuleWildcard(_) | TokenWildcard(_)) => Some(MismatchReason::WildcardInActual),
        (RuleWildcard(name), Rule { name: other, .. }) => {
            (name != other).then_some(MismatchReason::RuleName)
        }
        (TokenWildcard(kind), Leaf(symbol)) => {
            (kind != symbol.kind()).then_some(MismatchReason::SymbolType)
        }
        (Leaf(exp), Leaf(act)) => compare_symbols(exp, act, config),
        (
            Rule { name, children },
            Rule {
                name: actual_name,
                children: actual_children,
            },
        ) => {
            if name != actual_name {
                return Some(MismatchReason::RuleName);
            }
            if children.len() != actual_children.len() {
                return Some(MismatchReason::ChildCount {
                    expected: children.len(),
                    actual: actual_children.len(),
                });
            }
            for (i, (exp, act)) in children.iter().zip(actual_children).enumerate() {
                path.push(i);
                if let Some(reason) = compare_trees(exp, act, config, path) {
                    return Some(reason);
                }
                path.pop();
            }
            None
        }
        _ => Some(MismatchReason::NodeKind),
    }
}

fn compare_symbols(
    expected: &Symbol,
    actual: &Symbol,
    config: &CompareConfig,
) -> Option<MismatchReason> {
    if expected.kind() != actual.kind() {
        return Some(MismatchReason::SymbolType);
    }
    if expected.text() != actual.text()
        && !config.is_text_insensitive(&expected.kind().to_string())
    {
        return Some(MismatchReason::SymbolText);
    }

    let mode = config.positions;
    if mode == PositionMode::Never {
        return None;
    }
    PositionField::ALL.into_iter().find_map(|field| {
        if mode == PositionMode::Auto && field.get(expected).is_none() {
            return None;
        }
        (field_value(field, expected) != field_value(field, actual))
            .then_some(MismatchReason::Position(field))
    })
}

/// A missing channel reads as the default channel.
fn field_value(field: PositionField, symbol: &Symbol) -> Option<i64> {
    match field {
        PositionField::Channel => Some(field.get(symbol).unwrap_or(0)),
        _ => field.get(symbol),
    }
}
