//! Core traits for gramcheck.
//!
//! # Trait Hierarchy
//!
//! ```text
//! Lexer   (capability: text -> symbols)
//! Parser  (capability: symbols -> native tree -> DerivationTree)
//!
//! ToSpec  (rendering)
//!     └── Printer (layout + leaf notation)
//! ```
//!
//! The capabilities are supplied by the grammar under test; the engine never
//! looks them up by name.

mod capability;
mod printer;
mod to_spec;

pub use capability::{Lexer, Parser, Unavailable};
pub use printer::{Printer, SpecPrinter};
pub use to_spec::ToSpec;
