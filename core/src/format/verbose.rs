//! The verbose notation: `[@idx,start:stop='text',<TYPE>,line:col]`.
//!
//! A non-default channel is written between type and position, as in
//! `[@3,7:7=' ',<WS>,channel=1,1:7]`.

use crate::cursor::Cursor;
use crate::error::SpecSyntaxError;
use crate::symbol::{Span, Symbol, SymbolType, escape_text, unescape_text};

/// Channel assumed when a verbose item does not name one.
pub const DEFAULT_CHANNEL: usize = 0;

pub(super) fn parse_item(cur: &mut Cursor<'_>) -> Result<Symbol, SpecSyntaxError> {
    cur.expect('[')?;
    cur.expect('@')?;
    let index = cur.unsigned()?;
    cur.expect(',')?;
    let start = cur.unsigned()?;
    cur.expect(':')?;
    let stop_at = cur.pos();
    let stop = cur.signed()?;
    cur.expect('=')?;
    let text = text(cur)?;
    cur.expect(',')?;
    cur.expect('<')?;
    let kind = if cur.peek() == Some('\'') {
        SymbolType::Literal(cur.quoted()?)
    } else {
        cur.identifier()
            .map(SymbolType::named)
            .ok_or_else(|| cur.error("expected a token type"))?
    };
    cur.expect('>')?;
    cur.expect(',')?;
    let mut channel = DEFAULT_CHANNEL;
    if cur.eat_str("channel=") {
        channel = cur.unsigned()?;
        cur.expect(',')?;
    }
    let line = cur.unsigned()?;
    cur.expect(':')?;
    let column = cur.unsigned()?;
    cur.expect(']')?;

    let span = Span::from_stop(start, stop)
        .ok_or_else(|| cur.error_at(stop_at, "stop offset precedes start"))?;

    Ok(Symbol::new(kind, text)
        .with_index(index)
        .with_span(span)
        .with_position(line, column)
        .with_channel(channel))
}

/// The quoted text field. It ends at the first unescaped `'` followed by
/// `,<`, so quotes inside the text may be left unescaped: `='''`.
fn text(cur: &mut Cursor<'_>) -> Result<String, SpecSyntaxError> {
    let open = cur.pos();
    cur.expect('\'')?;
    let body_start = cur.pos();
    let rest = cur.rest();
    let mut chars = rest.char_indices();
    let end = loop {
        match chars.next() {
            None | Some((_, '\n')) => return Err(cur.error_at(open, "unterminated quoted text")),
            Some((_, '\\')) => {
                if chars.next().is_none() {
                    return Err(cur.error_at(open, "unterminated quoted text"));
                }
            }
            Some((i, '\'')) if rest[i..].starts_with("',<") => break i,
            Some(_) => {}
        }
    };
    cur.rewind(body_start + end + 1);
    unescape_text(&rest[..end]).map_err(|i| cur.error_at(body_start + i, "invalid escape sequence"))
}

fn field<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

pub(super) fn render_item(symbol: &Symbol) -> String {
    let channel = match symbol.channel() {
        Some(c) if c != DEFAULT_CHANNEL => format!(",channel={c}"),
        _ => String::new(),
    };
    format!(
        "[@{},{}:{}='{}',<{}>{},{}:{}]",
        field(symbol.index()),
        field(symbol.start()),
        field(symbol.end().map(|end| end as i64 - 1)),
        escape_text(symbol.text()),
        symbol.kind(),
        channel,
        field(symbol.line()),
        field(symbol.column()),
    )
}
