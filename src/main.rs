//! Purpose: `flatform` CLI entry point and argument definitions.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Commands emit stable stdout formats (JSON report or human line).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::error::Error as StdError;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{
    Args, CommandFactory, Parser, Subcommand, ValueEnum, ValueHint,
    error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod color_json;
mod command_dispatch;
mod report_json;

use color_json::colorize_json;
use flatform::api::{
    Error, ErrorKind, LoadOptions, ParseOutcome, Schema, ValueType, load, load_stdin,
    parse_object, to_exit_code,
};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Run `flatform --help` for usage."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    command_dispatch::dispatch_command(cli.command, color_mode).map_err(|err| (err, color_mode))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn clap_error_summary(err: &clap::Error) -> String {
    err.to_string()
        .lines()
        .next()
        .unwrap_or("invalid arguments")
        .trim_start_matches("error: ")
        .to_string()
}

#[derive(Parser)]
#[command(
    name = "flatform",
    version,
    about = "Schema-directed parsing for flat, string-valued JSON objects",
    help_template = r#"{about-with-newline}
{before-help}USAGE
  {usage}

COMMANDS
{subcommands}

OPTIONS
{options}

{after-help}
"#,
    long_about = None,
    before_help = r#"Declare the fields you expect, point at a JSON file, read the values back.
Accepted inputs are flat objects whose values are double-quoted strings;
unknown keys, duplicate keys, and malformed syntax are rejected.
"#,
    after_help = r#"EXAMPLES
  $ flatform parse hello.json --field message --field length
  {"file":"hello.json","outcome":"complete",...,"fields":{"message":"hello world","length":"11"},"missing":[]}

  $ echo '{"message":"hi"}' | flatform parse - --field message --field length
  $ flatform check hello.json --field message

  $ flatform <command> --help"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics and pretty JSON output: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Parse a JSON file against a declared schema, print a JSON report")]
    Parse {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, help = "Pretty-print the report (colorized when stdout is a tty)")]
        pretty: bool,
    },
    #[command(about = "Parse and report a one-line summary; outcome is in the exit code")]
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
    #[command(about = "Generate shell completions")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct InputArgs {
    #[arg(value_hint = ValueHint::FilePath, help = "Input file path, or '-' for stdin")]
    file: PathBuf,
    #[arg(
        long = "field",
        value_name = "NAME[:TYPE]",
        required = true,
        help = "Declare an expected field; TYPE is string|object (default string)"
    )]
    fields: Vec<String>,
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = 4096,
        help = "Initial read-buffer capacity"
    )]
    initial_capacity: usize,
}

fn declare_schema(specs: &[String]) -> Result<Schema, Error> {
    let mut schema = Schema::new();
    for spec in specs {
        let (name, expected) = parse_field_spec(spec)?;
        schema.declare(name, expected)?;
    }
    Ok(schema)
}

fn parse_field_spec(spec: &str) -> Result<(String, ValueType), Error> {
    let (name, type_name) = match spec.split_once(':') {
        Some((name, type_name)) => (name, type_name),
        None => (spec, "string"),
    };
    if name.is_empty() {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("field name is empty")
            .with_hint("Use --field <name> or --field <name>:string."));
    }
    let expected = match type_name {
        "string" => ValueType::String,
        "object" => ValueType::Object,
        other => {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(format!("unknown field type {other:?}"))
                .with_hint("Valid types: string, object."));
        }
    };
    Ok((name.to_string(), expected))
}

/// Declare, load, parse. Shared by `parse` and `check`.
fn run_parse(input: &InputArgs) -> Result<(Schema, ParseOutcome, String), Error> {
    let mut schema = declare_schema(&input.fields)?;
    let options = LoadOptions::new().with_initial_capacity(input.initial_capacity);
    let (content, label) = if input.file.as_os_str() == "-" {
        (load_stdin(&options)?, "-".to_string())
    } else {
        (
            load(&input.file, &options)?,
            input.file.display().to_string(),
        )
    };
    let outcome = parse_object(&mut schema, &content, 0)?;
    Ok((schema, outcome, label))
}

fn emit_report(report: &Value, pretty: bool, color_mode: ColorMode) -> Result<(), Error> {
    if pretty {
        let use_color = color_mode.use_color(io::stdout().is_terminal());
        println!("{}", colorize_json(report, use_color));
        return Ok(());
    }
    let line = serde_json::to_string(report).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode report")
            .with_source(err)
    })?;
    println!("{line}");
    Ok(())
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    match err.message() {
        Some(message) => message.to_string(),
        None => format!("{:?}", err.kind()),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    if let Some(offset) = err.offset() {
        inner.insert("offset".to_string(), json!(offset));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }
    if let Some(offset) = err.offset() {
        lines.push(format!(
            "{} {offset}",
            colorize_label("offset:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, use_color: bool, color: AnsiColor) -> String {
    if !use_color {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}
