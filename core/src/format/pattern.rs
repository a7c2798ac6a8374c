//! Pattern-defined notations.
//!
//! A pattern is a list of alternatives separated by `|`. Each alternative is
//! a sequence of field letters and literal text:
//!
//! | Letter | Field |
//! |--------|-------|
//! | `s` | symbolic type name (named types only) |
//! | `l` | quoted literal type, e.g. `'-'` (literal types only) |
//! | `X` | escaped text |
//! | `i` | token index |
//! | `b` | start offset |
//! | `e` | inclusive stop offset |
//! | `r` | line |
//! | `c` | column |
//! | `h` | channel |
//!
//! Text in single quotes is literal (`''` stands for one quote), as is any
//! character that is not a letter. Other letters are rejected.
//!
//! `s: "X"|'LITERAL': "l"` renders `ID: "x"` for a named token and
//! `LITERAL: "'-'"` for an anonymous `'-'` token.

use crate::cursor::Cursor;
use crate::error::SpecSyntaxError;
use crate::symbol::{EOF_TEXT, Symbol, SymbolType, escape_text, unescape_text};

/// A substitution point in a pattern alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternField {
    SymbolicName,
    LiteralName,
    Text,
    Index,
    Start,
    Stop,
    Line,
    Column,
    Channel,
}

impl PatternField {
    fn from_letter(c: char) -> Option<Self> {
        Some(match c {
            's' => Self::SymbolicName,
            'l' => Self::LiteralName,
            'X' => Self::Text,
            'i' => Self::Index,
            'b' => Self::Start,
            'e' => Self::Stop,
            'r' => Self::Line,
            'c' => Self::Column,
            'h' => Self::Channel,
            _ => return None,
        })
    }

    fn is_type(self) -> bool {
        matches!(self, Self::SymbolicName | Self::LiteralName)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(PatternField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Alternative {
    segments: Vec<Segment>,
}

/// A compiled pattern notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFormat {
    source: String,
    alternatives: Vec<Alternative>,
}

/// Field values captured while matching one alternative.
#[derive(Debug, Clone, Default)]
struct Captures {
    kind: Option<SymbolType>,
    text: Option<String>,
    index: Option<usize>,
    start: Option<usize>,
    stop: Option<i64>,
    line: Option<usize>,
    column: Option<usize>,
    channel: Option<usize>,
}

/// How far a field may extend when matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    /// The match must consume the whole input; prefer long field values.
    End,
    /// The match may stop anywhere; prefer short field values.
    Open,
}

impl PatternFormat {
    /// Compiles `pattern`, reporting errors at offsets within it.
    pub fn compile(pattern: &str) -> Result<Self, SpecSyntaxError> {
        let mut cur = Cursor::new(pattern);
        let mut alternatives = Vec::new();
        let mut segments = Vec::new();
        let mut alt_start = 0;

        loop {
            match cur.peek() {
                None | Some('|') => {
                    finish_alternative(&cur, alt_start, &mut segments, &mut alternatives)?;
                    if cur.bump().is_none() {
                        break;
                    }
                    alt_start = cur.pos();
                }
                Some('\'') => {
                    let open = cur.pos();
                    cur.bump();
                    let mut lit = String::new();
                    loop {
                        match cur.bump() {
                            None => return Err(cur.error_at(open, "unterminated quote in pattern")),
                            Some('\'') if cur.eat('\'') => lit.push('\''),
                            Some('\'') => break,
                            Some(c) => lit.push(c),
                        }
                    }
                    push_literal(&mut segments, &lit);
                }
                Some(c) if c.is_alphabetic() => {
                    let at = cur.pos();
                    cur.bump();
                    let field = PatternField::from_letter(c).ok_or_else(|| {
                        cur.error_at(at, format!("unknown pattern letter `{c}`"))
                    })?;
                    segments.push(Segment::Field(field));
                }
                Some(c) => {
                    cur.bump();
                    push_literal(&mut segments, c.encode_utf8(&mut [0; 4]));
                }
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            alternatives,
        })
    }

    /// The pattern this notation was compiled from.
    pub fn pattern(&self) -> &str {
        &self.source
    }

    /// Renders with the first alternative able to represent `symbol`.
    pub fn render_item(&self, symbol: &Symbol) -> Option<String> {
        self.alternatives.iter().find_map(|alt| alt.render(symbol))
    }

    /// Parses one symbol per non-blank line.
    pub(super) fn parse_lines(&self, spec: &str) -> Result<Vec<Symbol>, SpecSyntaxError> {
        let mut symbols = Vec::new();
        let mut offset = 0;
        for raw in spec.split('\n') {
            let line_start = offset;
            offset += raw.len() + 1;

            let lead = raw.len() - raw.trim_start().len();
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let (symbol, _) = self.best_match(line, Anchor::End).ok_or_else(|| {
                SpecSyntaxError::at(
                    spec,
                    line_start + lead,
                    "line matches no pattern alternative",
                )
            })?;
            symbols.push(symbol);
        }
        Ok(symbols)
    }

    /// Parses the shortest item at the cursor matching any alternative.
    ///
    /// A text field that ends an alternative has no closing delimiter here,
    /// so it takes the rest of the word: `s X` reads `ID x)` as `(ID 'x')`.
    /// Such text cannot contain spaces or `)`.
    pub(super) fn parse_item(&self, cur: &mut Cursor<'_>) -> Result<Symbol, SpecSyntaxError> {
        let rest = cur.rest();
        let (symbol, len) = self
            .best_match(rest, Anchor::Open)
            .ok_or_else(|| cur.error("input matches no pattern alternative"))?;
        cur.rewind(cur.pos() + len);
        Ok(symbol)
    }

    /// Matches every alternative and keeps the most specific success: the
    /// one with the most literal text, earliest first on ties.
    ///
    /// With `s: "X"|'LITERAL': "l"`, the line `LITERAL: "'-'"` also fits the
    /// first alternative, but the second one pins down more of it.
    fn best_match(&self, input: &str, anchor: Anchor) -> Option<(Symbol, usize)> {
        let mut best: Option<(usize, Symbol, usize)> = None;
        for alt in &self.alternatives {
            let Some((symbol, len)) = alt.parse(input, anchor) else {
                continue;
            };
            let weight = alt.literal_len();
            if best.as_ref().is_none_or(|(w, _, _)| weight > *w) {
                best = Some((weight, symbol, len));
            }
        }
        best.map(|(_, symbol, len)| (symbol, len))
    }
}

fn push_literal(segments: &mut Vec<Segment>, lit: &str) {
    if let Some(Segment::Literal(prev)) = segments.last_mut() {
        prev.push_str(lit);
    } else {
        segments.push(Segment::Literal(lit.to_string()));
    }
}

fn finish_alternative(
    cur: &Cursor<'_>,
    alt_start: usize,
    segments: &mut Vec<Segment>,
    alternatives: &mut Vec<Alternative>,
) -> Result<(), SpecSyntaxError> {
    let segments = std::mem::take(segments);
    if segments.is_empty() {
        return Err(cur.error_at(alt_start, "empty pattern alternative"));
    }
    let type_fields = segments
        .iter()
        .filter(|s| matches!(s, Segment::Field(f) if f.is_type()))
        .count();
    if type_fields != 1 {
        return Err(cur.error_at(
            alt_start,
            "pattern alternative needs exactly one type field (`s` or `l`)",
        ));
    }
    alternatives.push(Alternative { segments });
    Ok(())
}

impl Alternative {
    fn literal_len(&self) -> usize {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(lit) => lit.chars().count(),
                Segment::Field(_) => 0,
            })
            .sum()
    }

    fn render(&self, symbol: &Symbol) -> Option<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(lit) => out.push_str(lit),
                Segment::Field(field) => match field {
                    PatternField::SymbolicName => out.push_str(symbol.kind().symbolic_name()?),
                    PatternField::LiteralName => out.push_str(&symbol.kind().literal_name()?),
                    PatternField::Text => out.push_str(&escape_text(symbol.text())),
                    PatternField::Index => out.push_str(&symbol.index()?.to_string()),
                    PatternField::Start => out.push_str(&symbol.start()?.to_string()),
                    PatternField::Stop => out.push_str(&(symbol.end()? as i64 - 1).to_string()),
                    PatternField::Line => out.push_str(&symbol.line()?.to_string()),
                    PatternField::Column => out.push_str(&symbol.column()?.to_string()),
                    PatternField::Channel => out.push_str(&symbol.channel()?.to_string()),
                },
            }
        }
        Some(out)
    }

    /// Matches this alternative at the start of `input`; returns the symbol
    /// and the number of bytes consumed.
    fn parse(&self, input: &str, anchor: Anchor) -> Option<(Symbol, usize)> {
        let (len, caps) = match_segments(&self.segments, input, 0, anchor, Captures::default())?;
        Some((caps.into_symbol()?, len))
    }
}

fn match_segments(
    segments: &[Segment],
    input: &str,
    pos: usize,
    anchor: Anchor,
    caps: Captures,
) -> Option<(usize, Captures)> {
    let Some((segment, rest)) = segments.split_first() else {
        return match anchor {
            Anchor::End if pos != input.len() => None,
            _ => Some((pos, caps)),
        };
    };

    match segment {
        Segment::Literal(lit) => input[pos..]
            .starts_with(lit.as_str())
            .then(|| match_segments(rest, input, pos + lit.len(), anchor, caps))
            .flatten(),
        Segment::Field(PatternField::Text) => {
            let line_end = input[pos..].find('\n').map_or(input.len(), |i| pos + i);
            let mut ends: Vec<usize> = if anchor == Anchor::Open && rest.is_empty() {
                // Nothing follows to delimit the text, so it runs to the end of the word.
                let word_end = input[pos..line_end]
                    .find(|c: char| c.is_whitespace() || c == ')')
                    .map_or(line_end, |i| pos + i);
                vec![word_end]
            } else {
                (pos..=line_end)
                    .filter(|&i| input.is_char_boundary(i))
                    .collect()
            };
            if anchor == Anchor::End {
                ends.reverse();
            }
            ends.into_iter().find_map(|end| {
                let text = unescape_text(&input[pos..end]).ok()?;
                let mut caps = caps.clone();
                caps.text = Some(text);
                match_segments(rest, input, end, anchor, caps)
            })
        }
        Segment::Field(field) => {
            let mut cur = Cursor::new(input);
            cur.rewind(pos);
            let mut caps = caps;
            match field {
                PatternField::SymbolicName => {
                    caps.kind = Some(SymbolType::named(cur.identifier()?));
                }
                PatternField::LiteralName => {
                    caps.kind = Some(SymbolType::Literal(cur.quoted().ok()?));
                }
                PatternField::Stop => caps.stop = Some(cur.signed().ok()?),
                PatternField::Index => caps.index = Some(cur.unsigned().ok()?),
                PatternField::Start => caps.start = Some(cur.unsigned().ok()?),
                PatternField::Line => caps.line = Some(cur.unsigned().ok()?),
                PatternField::Column => caps.column = Some(cur.unsigned().ok()?),
                PatternField::Channel => caps.channel = Some(cur.unsigned().ok()?),
                PatternField::Text => return None,
            }
            match_segments(rest, input, cur.pos(), anchor, caps)
        }
    }
}

impl Captures {
    fn into_symbol(self) -> Option<Symbol> {
        let kind = self.kind?;
        let text = match (self.text, &kind) {
            (Some(text), _) => text,
            (None, SymbolType::Literal(lit)) => lit.clone(),
            (None, kind) if kind.is_eof() => EOF_TEXT.to_string(),
            (None, _) => String::new(),
        };

        let mut symbol = Symbol::new(kind, text);
        if let Some(index) = self.index {
            symbol = symbol.with_index(index);
        }
        if let Some(start) = self.start {
            symbol = symbol.with_start(start);
        }
        if let Some(stop) = self.stop {
            let end = usize::try_from(stop.checked_add(1)?).ok()?;
            if self.start.is_some_and(|start| end < start) {
                return None;
            }
            symbol = symbol.with_end(end);
        }
        if let Some(line) = self.line {
            symbol = symbol.with_line(line);
        }
        if let Some(column) = self.column {
            symbol = symbol.with_column(column);
        }
        if let Some(channel) = self.channel {
            symbol = symbol.with_channel(channel);
        }
        Some(symbol)
    }
}
