mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use perdiem_engine::EngineError;
use stdout_io::write_stdout;

const ROOT_HELP: &str = "Perdiem - legacy travel reimbursement engine

Usage:
  perdiem <command>

Start here:
  perdiem compute 3 93 1.42
  perdiem tariff show
  perdiem eval --help
";

const TOP_LEVEL_HELP: &str = "Perdiem — legacy travel reimbursement engine

USAGE: perdiem <command>

Compute a reimbursement:
  perdiem compute <days> <miles> <receipts>        Evaluate one trip to the cent
  perdiem compute 8 795 1645.99 --json             Same, as machine-readable JSON

Benchmark against recorded legacy outputs:
  1. perdiem eval --help                           Read the corpus schema
  2. perdiem eval <path>                           Batch-evaluate a labeled corpus
  cat cases.json | perdiem eval -                  Evaluate a corpus from stdin

Audit the constants:
  perdiem tariff show                              Show the active constant table
  perdiem tariff show --tariff <path>              Validate and show an artifact

Every command accepts --tariff <path> to compute with a fitted tariff
artifact instead of the built-in frozen table. A bad artifact is fatal:
the engine refuses to compute rather than use corrupt constants.

Having issues or errors?
  Run `perdiem <command> --help` for command usage.
";

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout(ROOT_HELP, false).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                if matches!(
                    err.kind(),
                    ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) && is_top_level_help_request(&raw_args)
                {
                    if write_stdout(TOP_LEVEL_HELP, false).is_err() {
                        return Err(ExitCode::from(2));
                    }
                } else if write_stdout(&err.to_string(), false).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }

            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
                    | ErrorKind::InvalidSubcommand
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                EngineError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };

    let mode = output::mode_for_command(&cli.command);

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(ExitCode::from(1))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing boilerplate (Usage line, "For more information"
/// hint) so the failure envelope's recovery steps are the single source
/// of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// Builds the subcommand path from raw CLI args for use in help hints.
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let non_flags: Vec<&str> = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect();
    if non_flags.is_empty() {
        return None;
    }

    let hint = match non_flags.as_slice() {
        ["compute", ..] => Some("compute"),
        ["eval", ..] => Some("eval"),
        ["tariff", "show", ..] => Some("tariff show"),
        ["tariff", ..] => Some("tariff"),
        _ => None,
    };

    hint.map(str::to_string)
}

/// Best-effort output mode for errors raised before the CLI is parsed.
fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().any(|value| value == "--json") {
        output::OutputMode::Json
    } else {
        output::OutputMode::Text
    }
}
