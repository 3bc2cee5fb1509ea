// Single "key": "value" pair parsing, cursor in / cursor out.
use bstr::BString;

use crate::core::error::{Error, ErrorKind};
use crate::core::scan::{skip_to_unescaped_quote, skip_whitespace};

/// One parsed key/value pair. Transient: produced here, consumed by the
/// object parser, then dropped. Name and value are byte-exact copies of the
/// quoted content with no escape decoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedField {
    pub name: BString,
    pub value: BString,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PrevToken {
    None,
    KeyQuote,
    Colon,
}

/// Parse one field starting at (or before, modulo whitespace) the key's
/// opening quote. Returns the field and the offset of the value's closing
/// quote; the caller advances past it.
pub fn parse_field(content: &[u8], start: usize) -> Result<(ParsedField, usize), Error> {
    let mut i = start;
    let mut prev = PrevToken::None;
    let mut name: Option<BString> = None;

    while i < content.len() {
        let j = skip_whitespace(content, i).map_err(|err| malformed(err, start))?;

        match (prev, content[j]) {
            (PrevToken::None, b'"') => {
                let open = j + 1;
                let close =
                    skip_to_unescaped_quote(content, open).map_err(|err| malformed(err, start))?;
                name = Some(BString::from(&content[open..close]));
                i = close + 1;
                prev = PrevToken::KeyQuote;
            }
            (PrevToken::KeyQuote, b':') => {
                i = j + 1;
                prev = PrevToken::Colon;
            }
            (PrevToken::Colon, b'"') => {
                let open = j + 1;
                let close =
                    skip_to_unescaped_quote(content, open).map_err(|err| malformed(err, start))?;
                let value = BString::from(&content[open..close]);
                let name = name.take().unwrap_or_default();
                return Ok((ParsedField { name, value }, close));
            }
            (_, byte) => {
                return Err(Error::new(ErrorKind::MalformedField)
                    .with_message(format!("unexpected byte {:?} in field", byte as char))
                    .with_offset(j));
            }
        }
    }

    Err(Error::new(ErrorKind::MalformedField)
        .with_message("input ended before field value")
        .with_offset(start))
}

// Scanner EndOfInput inside a field is a field-level grammar failure.
fn malformed(err: Error, start: usize) -> Error {
    Error::new(ErrorKind::MalformedField)
        .with_message("input ended inside field")
        .with_offset(start)
        .with_source(err)
}
