//! Purpose: Drive field parsing across one `{ ... }` literal against a schema.
//! Exports: `parse_object`, `ParseOutcome`.
//! Role: Object-level state machine; owns schema matching and duplicate rejection.
//! Invariants: On any error the schema keeps the fields resolved before the abort.
//! Invariants: Trailing bytes after a closed object are reported, never consumed.
use crate::core::error::{Error, ErrorKind};
use crate::core::field::parse_field;
use crate::core::scan::skip_whitespace;
use crate::core::schema::Schema;

/// Outcome of a successful object parse. The grammar covers exactly one
/// object; anything after its closing brace is left for the caller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseOutcome {
    /// The object closed and only whitespace remained.
    Complete,
    /// The object closed with non-whitespace bytes left over, starting at
    /// `resume`. Parsing again from there or ignoring it is caller policy.
    TrailingContent { resume: usize },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PrevToken {
    None,
    OpenBrace,
    KeyDone,
    Comma,
}

/// Parse one flat object literal starting at or after `start`, binding each
/// recognized key's value into the matching schema slot.
pub fn parse_object(schema: &mut Schema, content: &[u8], start: usize) -> Result<ParseOutcome, Error> {
    let mut i = start;
    let mut prev = PrevToken::None;
    let mut closed_at: Option<usize> = None;

    while i < content.len() {
        let Ok(j) = skip_whitespace(content, i) else {
            break;
        };

        match (prev, content[j]) {
            (PrevToken::None, b'{') => {
                i = j + 1;
                prev = PrevToken::OpenBrace;
            }
            (PrevToken::OpenBrace | PrevToken::Comma, b'"') => {
                let (field, after) = parse_field(content, j)?;
                let index = schema.find(&field.name).ok_or_else(|| {
                    Error::new(ErrorKind::UnknownField)
                        .with_message(format!("field {:?} is not in the schema", field.name))
                        .with_offset(j)
                })?;
                schema.resolve(index, field.value)?;
                i = after + 1;
                prev = PrevToken::KeyDone;
            }
            (PrevToken::KeyDone, b',') => {
                i = j + 1;
                prev = PrevToken::Comma;
            }
            (PrevToken::KeyDone, b'}') => {
                closed_at = Some(j);
                break;
            }
            (_, byte) => {
                return Err(Error::new(ErrorKind::Syntax)
                    .with_message(format!("unexpected byte {:?}", byte as char))
                    .with_offset(j));
            }
        }
    }

    let Some(end) = closed_at else {
        return Err(Error::new(ErrorKind::UnterminatedObject)
            .with_message("input ended before closing brace")
            .with_offset(i));
    };

    match skip_whitespace(content, end + 1) {
        Err(_) => Ok(ParseOutcome::Complete),
        Ok(resume) => Ok(ParseOutcome::TrailingContent { resume }),
    }
}

#[cfg(test)]
mod tests {
    use super::{ParseOutcome, parse_object};
    use crate::core::error::ErrorKind;
    use crate::core::schema::{Schema, ValueType};

    fn schema_of(names: &[&str]) -> Schema {
        let mut schema = Schema::new();
        for name in names {
            schema.declare(*name, ValueType::String).expect("declare");
        }
        schema
    }

    #[test]
    fn two_field_object_resolves_both() {
        let mut schema = schema_of(&["message", "length"]);
        let content = br#"{"message": "hello world", "length": "11"}"#;
        let outcome = parse_object(&mut schema, content, 0).expect("parse");
        assert_eq!(outcome, ParseOutcome::Complete);
        assert_eq!(schema.value(b"message").expect("value"), "hello world");
        assert_eq!(schema.value(b"length").expect("value"), "11");
    }

    #[test]
    fn declared_but_absent_key_stays_unresolved() {
        let mut schema = schema_of(&["message", "length"]);
        let content = br#"{"message": "hi"}"#;
        parse_object(&mut schema, content, 0).expect("parse");
        assert_eq!(schema.value(b"message").expect("value"), "hi");
        assert!(schema.value(b"length").is_none());
    }

    #[test]
    fn unknown_key_aborts() {
        let mut schema = schema_of(&["message"]);
        let err = parse_object(&mut schema, br#"{"extra":"x"}"#, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownField);

        // Position in the object does not matter.
        let mut schema = schema_of(&["message"]);
        let err =
            parse_object(&mut schema, br#"{"message":"a","extra":"x"}"#, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownField);
        assert_eq!(schema.value(b"message").expect("value"), "a");
    }

    #[test]
    fn duplicate_key_aborts_on_second_occurrence() {
        let mut schema = schema_of(&["message"]);
        let content = br#"{"message":"a","message":"b"}"#;
        let err = parse_object(&mut schema, content, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateField);
        // First binding survives the abort.
        assert_eq!(schema.value(b"message").expect("value"), "a");
    }

    #[test]
    fn reparse_into_resolved_schema_is_duplicate() {
        let mut schema = schema_of(&["message"]);
        let content = br#"{"message":"a"}"#;
        parse_object(&mut schema, content, 0).expect("first parse");
        let err = parse_object(&mut schema, content, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateField);
    }

    #[test]
    fn missing_closing_brace_is_unterminated() {
        let mut schema = schema_of(&["message"]);
        let err = parse_object(&mut schema, br#"{"message":"a""#, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnterminatedObject);
    }

    #[test]
    fn empty_and_whitespace_input_is_unterminated() {
        let mut schema = schema_of(&["message"]);
        let err = parse_object(&mut schema, b"", 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnterminatedObject);
        let err = parse_object(&mut schema, b"  \n ", 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnterminatedObject);
    }

    #[test]
    fn trailing_content_is_success_with_resume_offset() {
        let mut schema = schema_of(&["message"]);
        let content = br#"{"message":"a"} garbage"#;
        let outcome = parse_object(&mut schema, content, 0).expect("parse");
        let ParseOutcome::TrailingContent { resume } = outcome else {
            panic!("expected trailing content, got {outcome:?}");
        };
        assert_eq!(content[resume], b'g');
        assert_eq!(schema.value(b"message").expect("value"), "a");
    }

    #[test]
    fn trailing_whitespace_is_complete() {
        let mut schema = schema_of(&["message"]);
        let content = b"{\"message\":\"a\"} \n\t ";
        let outcome = parse_object(&mut schema, content, 0).expect("parse");
        assert_eq!(outcome, ParseOutcome::Complete);
    }

    #[test]
    fn empty_object_is_a_syntax_error() {
        let mut schema = schema_of(&["message"]);
        let err = parse_object(&mut schema, b"{}", 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn stray_bytes_are_syntax_errors() {
        let mut schema = schema_of(&["message"]);
        let err = parse_object(&mut schema, br#"["message"]"#, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);

        let mut schema = schema_of(&["message"]);
        let err = parse_object(&mut schema, br#"{"message":"a",,}"#, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn malformed_field_propagates() {
        let mut schema = schema_of(&["message"]);
        let err = parse_object(&mut schema, br#"{"message": 7}"#, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedField);
    }

    #[test]
    fn leading_whitespace_before_object_is_fine() {
        let mut schema = schema_of(&["message"]);
        let content = b"  \n {\"message\":\"a\"}";
        let outcome = parse_object(&mut schema, content, 0).expect("parse");
        assert_eq!(outcome, ParseOutcome::Complete);
    }
}
