use super::to_spec::ToSpec;
use crate::format::SymbolFormatter;
use crate::symbol::Symbol;

/// Output buffer for rendering symbols and trees as spec text.
///
/// Implementors own the buffer and the indent depth and decide how a leaf
/// symbol is written. Everything else, from whitespace to separated lists,
/// is provided on top of those.
pub trait Printer: Sized {
    fn buf(&self) -> &str;
    fn buf_mut(&mut self) -> &mut String;
    fn indent_level(&self) -> usize;
    fn set_indent(&mut self, level: usize);
    /// The rendered text.
    fn into_string(self) -> String;

    /// Render a leaf symbol in the printer's token notation.
    fn symbol(&mut self, symbol: &Symbol);

    /// Whether nested structures are laid out over several lines.
    fn is_pretty(&self) -> bool;

    fn word(&mut self, s: &str) {
        self.buf_mut().push_str(s);
    }

    fn char(&mut self, c: char) {
        self.buf_mut().push(c);
    }

    fn space(&mut self) {
        self.char(' ');
    }

    fn spaces(&mut self, n: usize) {
        self.buf_mut().extend(std::iter::repeat_n(' ', n));
    }

    /// Line break followed by the current indentation.
    fn newline(&mut self) {
        self.char('\n');
        self.spaces(self.indent_level() * self.indent_width());
    }

    /// Spaces per indent level.
    fn indent_width(&self) -> usize {
        4
    }

    fn indent(&mut self) {
        self.set_indent(self.indent_level() + 1);
    }

    /// Saturates at zero.
    fn dedent(&mut self) {
        let level = self.indent_level();
        if level > 0 {
            self.set_indent(level - 1);
        }
    }

    fn write<T: ToSpec + ?Sized>(&mut self, value: &T) {
        value.write(self);
    }

    /// Writes `items` with `sep` between consecutive ones.
    fn write_separated<'a, T, I>(&mut self, items: I, sep: &str)
    where
        T: ToSpec + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for (idx, item) in items.into_iter().enumerate() {
            if idx > 0 {
                self.word(sep);
            }
            self.write(item);
        }
    }
}

/// The stock [`Printer`]: leaves rendered by a [`SymbolFormatter`].
#[derive(Debug, Clone, Default)]
pub struct SpecPrinter {
    buf: String,
    indent: usize,
    formatter: SymbolFormatter,
    pretty: bool,
}

impl SpecPrinter {
    /// A single-line printer.
    pub fn new(formatter: SymbolFormatter) -> Self {
        Self {
            buf: String::new(),
            indent: 0,
            formatter,
            pretty: false,
        }
    }

    /// A printer that breaks nested structures across indented lines.
    pub fn pretty(formatter: SymbolFormatter) -> Self {
        Self {
            pretty: true,
            ..Self::new(formatter)
        }
    }
}

impl Printer for SpecPrinter {
    fn buf(&self) -> &str {
        &self.buf
    }

    fn buf_mut(&mut self) -> &mut String {
        &mut self.buf
    }

    fn indent_level(&self) -> usize {
        self.indent
    }

    fn set_indent(&mut self, level: usize) {
        self.indent = level;
    }

    fn into_string(self) -> String {
        self.buf
    }

    fn symbol(&mut self, symbol: &Symbol) {
        let item = self.formatter.render_symbol(symbol);
        self.word(&item);
    }

    fn is_pretty(&self) -> bool {
        self.pretty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newline_indents_with_spaces() {
        let mut p = SpecPrinter::pretty(SymbolFormatter::Default);
        p.word("(prog");
        p.indent();
        p.newline();
        p.symbol(&Symbol::eof());
        p.dedent();
        p.dedent();
        p.char(')');
        assert_eq!(p.indent_level(), 0);
        assert_eq!(p.into_string(), "(prog\n    EOF)");
    }

    #[test]
    fn test_write_separated() {
        let symbols = [Symbol::named("ID", "x"), Symbol::literal("=")];
        let mut p = SpecPrinter::new(SymbolFormatter::Default);
        p.write_separated(symbols.iter(), " ");
        assert_eq!(p.buf(), "(ID 'x') '='");
        assert!(!p.is_pretty());
    }
}
