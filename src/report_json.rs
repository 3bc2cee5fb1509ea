//! Purpose: Shared parse-report JSON serializers for CLI output paths.
//! Exports: `parse_report_json`.
//! Role: Keep the stdout report envelope shape consistent across commands.
//! Invariants: Stable key names for v0 report payloads; fields are additive-only.
//! Invariants: `trailing_offset` is emitted only for trailing-content outcomes.

use bstr::ByteSlice;
use flatform::api::{ParseOutcome, Schema};
use serde_json::{Map, Value, json};

pub(crate) fn parse_report_json(input: &str, schema: &Schema, outcome: ParseOutcome) -> Value {
    let mut map = Map::new();
    map.insert("file".to_string(), json!(input));
    match outcome {
        ParseOutcome::Complete => {
            map.insert("outcome".to_string(), json!("complete"));
        }
        ParseOutcome::TrailingContent { resume } => {
            map.insert("outcome".to_string(), json!("trailing"));
            map.insert("trailing_offset".to_string(), json!(resume));
        }
    }
    map.insert("declared".to_string(), declared_json(schema));
    map.insert("fields".to_string(), fields_json(schema));
    map.insert("missing".to_string(), missing_json(schema));
    Value::Object(map)
}

fn declared_json(schema: &Schema) -> Value {
    let entries: Vec<Value> = schema
        .fields()
        .map(|field| {
            let expected = serde_json::to_value(field.expected()).unwrap_or(Value::Null);
            json!({
                "name": field.name().to_str_lossy(),
                "type": expected,
            })
        })
        .collect();
    Value::Array(entries)
}

fn fields_json(schema: &Schema) -> Value {
    let mut map = Map::new();
    for field in schema.fields() {
        let value = match field.value() {
            Some(value) => json!(value.to_str_lossy()),
            None => Value::Null,
        };
        map.insert(field.name().to_str_lossy().into_owned(), value);
    }
    Value::Object(map)
}

fn missing_json(schema: &Schema) -> Value {
    let names: Vec<Value> = schema
        .fields()
        .filter(|field| !field.is_resolved())
        .map(|field| json!(field.name().to_str_lossy()))
        .collect();
    Value::Array(names)
}

#[cfg(test)]
mod tests {
    use super::parse_report_json;
    use flatform::api::{ParseOutcome, Schema, ValueType, parse_object};

    fn parsed_schema() -> (Schema, ParseOutcome) {
        let mut schema = Schema::new();
        schema.declare("message", ValueType::String).expect("declare");
        schema.declare("length", ValueType::String).expect("declare");
        let outcome =
            parse_object(&mut schema, br#"{"message":"hi"} extra"#, 0).expect("parse");
        (schema, outcome)
    }

    #[test]
    fn report_has_required_fields() {
        let (schema, outcome) = parsed_schema();
        let report = parse_report_json("input.json", &schema, outcome);

        assert_eq!(report["file"], "input.json");
        assert_eq!(report["outcome"], "trailing");
        assert_eq!(report["trailing_offset"], 17);
        assert_eq!(report["fields"]["message"], "hi");
        assert!(report["fields"]["length"].is_null());
        assert_eq!(report["missing"][0], "length");
        assert_eq!(report["declared"][0]["name"], "message");
        assert_eq!(report["declared"][0]["type"], "string");
    }

    #[test]
    fn complete_outcome_has_no_trailing_offset() {
        let mut schema = Schema::new();
        schema.declare("message", ValueType::String).expect("declare");
        let outcome = parse_object(&mut schema, br#"{"message":"hi"}"#, 0).expect("parse");
        let report = parse_report_json("input.json", &schema, outcome);
        assert_eq!(report["outcome"], "complete");
        assert!(report.get("trailing_offset").is_none());
    }
}
