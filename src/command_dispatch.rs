//! Purpose: Hold top-level CLI command dispatch for `flatform`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Command behavior, output envelopes, and exit code semantics stay unchanged.
//! Invariants: Helpers in `main.rs` remain the source of command business logic.

use super::*;

pub(super) fn dispatch_command(
    command: Command,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "flatform", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Parse { input, pretty } => {
            let (schema, outcome, label) = run_parse(&input)?;
            let report = report_json::parse_report_json(&label, &schema, outcome);
            emit_report(&report, pretty, color_mode)?;
            Ok(RunOutcome::ok())
        }
        Command::Check { input } => {
            let (schema, outcome, label) = run_parse(&input)?;
            println!("{}", check_summary(&label, &schema, outcome));
            Ok(RunOutcome::ok())
        }
    }
}

fn check_summary(label: &str, schema: &Schema, outcome: ParseOutcome) -> String {
    let resolved = schema.fields().filter(|field| field.is_resolved()).count();
    let mut summary = format!("ok: {label}: {resolved}/{} fields resolved", schema.len());
    if resolved < schema.len() {
        let missing: Vec<String> = schema
            .fields()
            .filter(|field| !field.is_resolved())
            .map(|field| field.name().to_string())
            .collect();
        summary.push_str(&format!(" (missing: {})", missing.join(", ")));
    }
    if let ParseOutcome::TrailingContent { resume } = outcome {
        summary.push_str(&format!("; trailing content at byte {resume}"));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::check_summary;
    use flatform::api::{ParseOutcome, Schema, ValueType, parse_object};

    #[test]
    fn check_summary_reports_missing_and_trailing() {
        let mut schema = Schema::new();
        schema.declare("message", ValueType::String).expect("declare");
        schema.declare("length", ValueType::String).expect("declare");
        let outcome =
            parse_object(&mut schema, br#"{"message":"hi"} rest"#, 0).expect("parse");

        let summary = check_summary("input.json", &schema, outcome);
        assert_eq!(
            summary,
            "ok: input.json: 1/2 fields resolved (missing: length); trailing content at byte 17"
        );
    }

    #[test]
    fn check_summary_for_complete_parse_is_bare() {
        let mut schema = Schema::new();
        schema.declare("message", ValueType::String).expect("declare");
        let outcome = parse_object(&mut schema, br#"{"message":"hi"}"#, 0).expect("parse");
        assert_eq!(
            check_summary("-", &schema, outcome),
            "ok: -: 1/1 fields resolved"
        );
    }
}
