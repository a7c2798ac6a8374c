//! Token values shared by every notation and capability.

use core::fmt;

/// Name of the end-of-stream token type.
pub const EOF_TYPE: &str = "EOF";

/// Text carried by the end-of-stream token.
pub const EOF_TEXT: &str = "<EOF>";

/// The category of a [`Symbol`].
///
/// Grammars name most token types (`ID`, `INT`); tokens written inline in a
/// parser rule (`'='`) only have their literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolType {
    /// A symbolic token type such as `ID` or `EOF`.
    Named(String),
    /// An anonymous literal token; holds the unquoted literal, e.g. `=`.
    Literal(String),
}

impl SymbolType {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn literal(literal: impl Into<String>) -> Self {
        Self::Literal(literal.into())
    }

    pub fn eof() -> Self {
        Self::Named(EOF_TYPE.to_string())
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Named(name) if name == EOF_TYPE)
    }

    /// The symbolic name, for named types.
    pub fn symbolic_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Literal(_) => None,
        }
    }

    /// The quoted literal (`'='`), for literal types.
    pub fn literal_name(&self) -> Option<String> {
        match self {
            Self::Named(_) => None,
            Self::Literal(lit) => Some(quote(lit)),
        }
    }

    /// Parses the rendered form: `'='` is a literal, anything else a name.
    ///
    /// Returns `None` when a quoted literal holds an invalid escape.
    pub fn from_display(s: &str) -> Option<Self> {
        if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
            unescape_text(&s[1..s.len() - 1]).ok().map(Self::Literal)
        } else {
            Some(Self::Named(s.to_string()))
        }
    }
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Literal(lit) => f.write_str(&quote(lit)),
        }
    }
}

/// A byte range of lexer input, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Builds a span from an inclusive `stop` as written in verbose specs,
    /// where an empty token at `start` has `stop == start - 1`.
    ///
    /// Returns `None` when `stop` lies before `start - 1`.
    pub fn from_stop(start: usize, stop: i64) -> Option<Self> {
        let end = stop.checked_add(1)?;
        let end = usize::try_from(end).ok()?;
        (end >= start).then_some(Self { start, end })
    }

    /// The inclusive stop offset, `start - 1` for empty spans.
    #[inline]
    pub fn stop(&self) -> i64 {
        self.end as i64 - 1
    }

    /// Length in bytes. Inverted spans clamp to zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One lexical token.
///
/// Only the type and text are always present. Position fields are filled in
/// by lexers and by notations that encode them; the comparator uses their
/// presence to decide what to compare.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol {
    kind: SymbolType,
    text: String,
    index: Option<usize>,
    start: Option<usize>,
    end: Option<usize>,
    line: Option<usize>,
    column: Option<usize>,
    channel: Option<usize>,
}

impl Symbol {
    pub fn new(kind: SymbolType, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            index: None,
            start: None,
            end: None,
            line: None,
            column: None,
            channel: None,
        }
    }

    /// A token of a named type.
    pub fn named(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(SymbolType::named(name), text)
    }

    /// An anonymous literal token whose text is the literal itself.
    pub fn literal(literal: impl Into<String>) -> Self {
        let literal = literal.into();
        Self::new(SymbolType::Literal(literal.clone()), literal)
    }

    /// The end-of-stream token.
    pub fn eof() -> Self {
        Self::new(SymbolType::eof(), EOF_TEXT)
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.start = Some(span.start);
        self.end = Some(span.end);
        self
    }

    pub fn with_start(mut self, start: usize) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: usize) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets the 1-based line and 0-based column.
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_channel(mut self, channel: usize) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Drops every position field, keeping type and text.
    pub fn without_position(self) -> Self {
        Self::new(self.kind, self.text)
    }

    #[inline]
    pub fn kind(&self) -> &SymbolType {
        &self.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    #[inline]
    pub fn start(&self) -> Option<usize> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<usize> {
        self.end
    }

    /// The byte span, when both offsets are known.
    pub fn span(&self) -> Option<Span> {
        Some(Span::new(self.start?, self.end?))
    }

    #[inline]
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    #[inline]
    pub fn column(&self) -> Option<usize> {
        self.column
    }

    #[inline]
    pub fn channel(&self) -> Option<usize> {
        self.channel
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind.is_eof()
    }

    /// True if any position field is set.
    pub fn has_position(&self) -> bool {
        self.index.is_some()
            || self.start.is_some()
            || self.end.is_some()
            || self.line.is_some()
            || self.column.is_some()
            || self.channel.is_some()
    }
}

fn quote(lit: &str) -> String {
    format!("'{}'", escape_text(lit))
}

/// Escapes text for use inside single quotes.
///
/// Line breaks and tabs become `\n`, `\r`, `\t`; backslashes and quotes are
/// backslash-escaped.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            c => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape_text`].
///
/// On an unknown or dangling escape, returns the byte offset of its
/// backslash.
pub fn unescape_text(text: &str) -> Result<String, usize> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some((_, 'n')) => out.push('\n'),
            Some((_, 'r')) => out.push('\r'),
            Some((_, 't')) => out.push('\t'),
            Some((_, '\\')) => out.push('\\'),
            Some((_, '\'')) => out.push('\''),
            Some((_, '"')) => out.push('"'),
            _ => return Err(i),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("\n", r"\n"; "newline")]
    #[test_case("\r\n", r"\r\n"; "crlf")]
    #[test_case("it's", r"it\'s"; "quote")]
    #[test_case(r"a\b", r"a\\b"; "backslash")]
    #[test_case("plain", "plain"; "plain")]
    fn test_escape(raw: &str, escaped: &str) {
        assert_eq!(escape_text(raw), escaped);
        assert_eq!(unescape_text(escaped).as_deref(), Ok(raw));
    }

    #[test]
    fn test_unescape_rejects_unknown() {
        assert_eq!(unescape_text(r"ab\q"), Err(2));
        assert_eq!(unescape_text("dangling\\"), Err(8));
    }

    #[test]
    fn test_symbol_type_display() {
        assert_eq!(SymbolType::named("ID").to_string(), "ID");
        assert_eq!(SymbolType::literal("=").to_string(), "'='");
        assert_eq!(SymbolType::literal("'").to_string(), r"'\''");
        assert_eq!(SymbolType::from_display("'='"), Some(SymbolType::literal("=")));
        assert_eq!(SymbolType::from_display("INT"), Some(SymbolType::named("INT")));
        assert!(SymbolType::eof().is_eof());
    }

    #[test_case(6, 5, Some(Span::new(6, 6)); "empty at end")]
    #[test_case(0, -1, Some(Span::new(0, 0)); "empty at start")]
    #[test_case(2, 3, Some(Span::new(2, 4)); "two bytes")]
    #[test_case(6, 3, None; "inverted")]
    fn test_span_from_stop(start: usize, stop: i64, expected: Option<Span>) {
        assert_eq!(Span::from_stop(start, stop), expected);
    }

    #[test]
    fn test_span_stop() {
        assert_eq!(Span::new(0, 0).stop(), -1);
        assert_eq!(Span::new(4, 6).stop(), 5);
        assert!(Span::new(9, 3).is_empty());
    }

    #[test]
    fn test_symbol_builders() {
        let sym = Symbol::named("ID", "x")
            .with_index(0)
            .with_span(Span::new(0, 1))
            .with_position(1, 0);

        assert_eq!(sym.span(), Some(Span::new(0, 1)));
        assert!(sym.has_position());
        assert!(!sym.clone().without_position().has_position());
        assert_eq!(sym.without_position(), Symbol::named("ID", "x"));

        let lit = Symbol::literal("=");
        assert_eq!(lit.text(), "=");
        assert_eq!(lit.kind().literal_name().as_deref(), Some("'='"));
        assert_eq!(Symbol::eof().text(), EOF_TEXT);
    }
}
