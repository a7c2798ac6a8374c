#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Expression Grammar Example
//!
//! A small calculator grammar with a lexer and parser that gramcheck can
//! test. The parser builds trees shaped the way a generated LL parser would:
//! every rule application is a node, every consumed token a leaf.
//!
//! # Grammar
//!
//! ```text
//! prog : stat+ EOF ;
//! stat : expr NEWLINE
//!      | ID '=' expr NEWLINE
//!      | NEWLINE
//!      ;
//! expr : expr ('*'|'/') expr
//!      | expr ('+'|'-') expr
//!      | INT
//!      | ID
//!      | '(' expr ')'
//!      ;
//!
//! ID      : [a-zA-Z]+ ;
//! INT     : '-'? [0-9]+ ;
//! NEWLINE : '\r'? '\n' ;
//! WS      : [ \t]+ -> skip ;
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use expression_grammar::{ExpressionLexer, ExpressionParser};
//! use gramcheck::Oracle;
//!
//! let oracle = Oracle::for_grammar(ExpressionLexer, ExpressionParser);
//! oracle.assert_symbols(r"(ID 'x') '=' (INT '5') (NEWLINE '\n') EOF", "x = 5\n");
//! ```

use thiserror::Error;

pub mod lexer;
pub mod parser;

pub use lexer::{ExpressionLexer, Token};
pub use parser::{ExpressionParser, Node, Rule};

/// Why the parser rejected its input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("mismatched input '{found}' expecting {expect}")]
    Mismatched { expect: &'static str, found: String },

    #[error("missing {expect} at end of input")]
    Missing { expect: &'static str },

    #[error("no viable alternative at input '{0}'")]
    NoViableAlternative(String),

    #[error("extraneous input '{0}' expecting <EOF>")]
    Extraneous(String),
}
