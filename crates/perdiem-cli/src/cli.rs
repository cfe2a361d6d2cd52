use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Extended help shown after `perdiem eval --help`.
/// Contains the corpus schema and workflow guidance.
pub const EVAL_AFTER_HELP: &str = "\
How eval works:
  Eval is a batch client of the same engine `perdiem compute` uses.
  It runs every labeled case through the active tariff and reports
  aggregate error against the recorded legacy outputs.

  Accepted formats:
    JSON — one top-level array of case objects
    CSV  — one header row with the case field names

  <path> is a local file path.
  To read stdin explicitly, use `-` as the path.
  Example: cat cases.json | perdiem eval -

Case schema:
  JSON example (one top-level array):
  [
    {
      \"days\": 8,
      \"miles\": 795,
      \"receipts\": 1645.99,
      \"expected\": 1494.21
    }
  ]

  The legacy export shape is also accepted:
  [
    {
      \"input\": {
        \"trip_duration_days\": 8,
        \"miles_traveled\": 795,
        \"total_receipts_amount\": 1645.99
      },
      \"expected_output\": 1494.21
    }
  ]

  CSV example (header + rows):
  days,miles,receipts,expected
  8,795,1645.99,1494.21
  5,500,200.00,867.00

Field rules:
  days      positive integer
  miles     non-negative, at most 3 decimal places
  receipts  non-negative dollars, at most 2 decimal places
  expected  non-negative dollars, at most 2 decimal places

Every row must validate or nothing is evaluated; each bad row is
reported with its position.

Scoring:
  exact match  within $0.01 of the expected amount
  close match  within $1.00
  score        mean absolute error x 100 + 0.1 per inexact case
               (lower is better)
";

#[derive(Debug, Parser)]
#[command(
    name = "perdiem",
    version,
    about = "legacy travel reimbursement engine",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute the reimbursement for one trip
    Compute {
        /// Trip duration in whole days (positive integer)
        days: String,
        /// Miles traveled (non-negative, at most 3 decimal places)
        miles: String,
        /// Receipt total in dollars (non-negative, at most 2 decimal places)
        receipts: String,
        /// Path to a versioned tariff artifact overriding the built-in table
        #[arg(long, value_name = "PATH")]
        tariff: Option<PathBuf>,
        /// Emit structured JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },
    /// Batch-evaluate a labeled corpus against the engine
    #[command(after_long_help = EVAL_AFTER_HELP)]
    Eval {
        /// Path to a JSON or CSV corpus of labeled cases (use `-` for stdin)
        path: String,
        /// Path to a versioned tariff artifact overriding the built-in table
        #[arg(long, value_name = "PATH")]
        tariff: Option<PathBuf>,
        /// Emit structured JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },
    /// Inspect the constant table the engine computes with
    #[command(arg_required_else_help = true)]
    Tariff {
        #[command(subcommand)]
        command: TariffCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum TariffCommand {
    /// Show the active tariff constants and their version
    Show {
        /// Path to a versioned tariff artifact overriding the built-in table
        #[arg(long, value_name = "PATH")]
        tariff: Option<PathBuf>,
        /// Emit structured JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
