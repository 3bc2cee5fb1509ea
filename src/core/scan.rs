// Position-advancing scanner primitives over (buffer, offset).
// Pure functions, no copies; callers own all cursor bookkeeping.
use crate::core::error::{Error, ErrorKind};

/// Advance past ASCII whitespace, returning the offset of the first
/// non-whitespace byte. `EndOfInput` if the buffer ends first.
pub fn skip_whitespace(content: &[u8], start: usize) -> Result<usize, Error> {
    let mut i = start;
    while i < content.len() && content[i].is_ascii_whitespace() {
        i += 1;
    }
    if i == content.len() {
        return Err(Error::new(ErrorKind::EndOfInput)
            .with_message("ran out of input while skipping whitespace")
            .with_offset(start));
    }
    Ok(i)
}

/// Find the next `"` at or after `start` that is preceded by an even number
/// of consecutive `\` bytes, i.e. the true string terminator. The backslash
/// count never looks back past `start`, so bytes belonging to an earlier
/// token cannot change the parity.
pub fn skip_to_unescaped_quote(content: &[u8], start: usize) -> Result<usize, Error> {
    let mut i = start;
    while i < content.len() {
        if content[i] == b'"' {
            let mut backslashes = 0usize;
            let mut j = i;
            while j > start && content[j - 1] == b'\\' {
                backslashes += 1;
                j -= 1;
            }
            if backslashes % 2 == 0 {
                return Ok(i);
            }
        }
        i += 1;
    }
    Err(Error::new(ErrorKind::EndOfInput)
        .with_message("no unescaped quote before end of input")
        .with_offset(start))
}
