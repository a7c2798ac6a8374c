#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! Test a grammar's lexer and parser against expectations written in
//! compact spec notation.
//!
//! Everything from `gramcheck-core` is re-exported; [`Oracle`] adds the
//! assertions.

mod harness;

pub use gramcheck_core::*;
pub use harness::Oracle;
