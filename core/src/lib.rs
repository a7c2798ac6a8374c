//! The spec engine behind gramcheck.
//!
//! Expected token streams and parse trees are written in small textual
//! notations, parsed into [`Symbol`] lists and [`DerivationTree`]s, and
//! compared against what a grammar's lexer and parser actually produce.
//!
//! ```ignore
//! use gramcheck_core::{CompareConfig, Matches, SymbolProvider, TreeProvider};
//!
//! let symbols = SymbolProvider::new(&lexer);
//! let expected = symbols.from_spec(r"(ID 'x') '=' (INT '5') (NEWLINE '\n') EOF")?;
//! let actual = symbols.from_input("x = 5\n")?;
//! expected.matches(&actual, &CompareConfig::default())?;
//!
//! let trees = TreeProvider::new(&parser);
//! let expected = trees.from_spec("(prog (<stat>) EOF)")?;
//! let actual = trees.from_input(&actual, "prog")?;
//! expected.matches(&actual, &CompareConfig::default())?;
//! ```

pub mod config;
pub mod cursor;
mod error;
pub mod format;
mod matching;
mod provider;
mod symbol;
pub mod traits;
mod tree;
mod tree_format;

pub use config::{CompareConfig, ParseConfig, PositionMode, RecursionGuard};
pub use error::{Error, LexFailure, ParseFailure, SpecSyntaxError};
pub use format::{PatternField, PatternFormat, SymbolFormatter};
pub use matching::{MatchResult, Matches, Mismatch, MismatchReason, PositionField};
pub use provider::{SymbolProvider, TreeProvider};
pub use symbol::{EOF_TEXT, EOF_TYPE, Span, Symbol, SymbolType, escape_text, unescape_text};
pub use traits::{Lexer, Parser, Printer, SpecPrinter, ToSpec, Unavailable};
pub use tree::DerivationTree;
pub use tree_format::TreeFormatter;
