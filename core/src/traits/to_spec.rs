use super::printer::{Printer, SpecPrinter};
use crate::format::SymbolFormatter;
use crate::symbol::Symbol;

/// Trait for rendering values back into spec notation.
///
/// `ToSpec` is the inverse of spec parsing. Failure reports use it to show
/// the expected and actual values in the notation the test was written in.
///
/// # Example
///
/// ```ignore
/// use gramcheck_core::{Printer, ToSpec};
///
/// impl ToSpec for Pair {
///     fn write<P: Printer>(&self, p: &mut P) {
///         p.symbol(&self.key);
///         p.space();
///         p.symbol(&self.value);
///     }
/// }
/// ```
///
/// # Blanket Implementations
///
/// - `[T]`, `Vec<T>`: Items separated by a space
/// - `Box<T>`, `&T`: Delegate to the inner value
pub trait ToSpec {
    /// Write this value to the printer.
    fn write<P: Printer>(&self, printer: &mut P);

    /// Single-line rendering with the given leaf notation.
    fn to_spec(&self, formatter: &SymbolFormatter) -> String {
        let mut printer = SpecPrinter::new(formatter.clone());
        self.write(&mut printer);
        printer.into_string()
    }

    /// Indented multi-line rendering with the given leaf notation.
    fn to_spec_pretty(&self, formatter: &SymbolFormatter) -> String {
        let mut printer = SpecPrinter::pretty(formatter.clone());
        self.write(&mut printer);
        printer.into_string()
    }
}

impl ToSpec for Symbol {
    fn write<P: Printer>(&self, p: &mut P) {
        p.symbol(self);
    }
}

impl<T: ToSpec> ToSpec for [T] {
    fn write<P: Printer>(&self, p: &mut P) {
        p.write_separated(self.iter(), " ");
    }
}

impl<T: ToSpec> ToSpec for Vec<T> {
    fn write<P: Printer>(&self, p: &mut P) {
        self.as_slice().write(p);
    }
}

impl<T: ToSpec + ?Sized> ToSpec for Box<T> {
    fn write<P: Printer>(&self, p: &mut P) {
        self.as_ref().write(p);
    }
}

impl<T: ToSpec + ?Sized> ToSpec for &T {
    fn write<P: Printer>(&self, p: &mut P) {
        (*self).write(p);
    }
}
