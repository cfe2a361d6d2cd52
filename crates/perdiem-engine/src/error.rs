use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::CorpusIssue;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct EngineError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl EngineError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `perdiem {cmd} --help` for usage."),
            None => "Run `perdiem --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn tariff_unreadable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "tariff_unreadable",
            &format!("Cannot read tariff artifact at `{location}`: {detail}"),
            vec![
                format!("Check that `{location}` exists and is readable."),
                "Omit --tariff to use the built-in frozen tariff.".to_string(),
            ],
        )
    }

    pub fn tariff_malformed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "tariff_malformed",
            &format!("Tariff artifact at `{location}` is not valid: {detail}"),
            vec![
                "Every tariff field is required and must have its documented type.".to_string(),
                "Run `perdiem tariff show --json` to see the expected shape.".to_string(),
            ],
        )
    }

    pub fn tariff_unsound(path: &Path, problems: Vec<String>) -> Self {
        let location = path.display().to_string();
        Self::new(
            "tariff_unsound",
            &format!(
                "Tariff artifact at `{location}` failed validation: {} constants are unsound. \
                 Refusing to compute with a corrupt table.",
                problems.len()
            ),
            vec![
                "Fix the listed constants in the artifact.".to_string(),
                "Omit --tariff to use the built-in frozen tariff.".to_string(),
            ],
        )
        .with_data(json!({
            "problems": problems,
        }))
    }

    pub fn corpus_unreadable(source: &str, detail: &str) -> Self {
        Self::new(
            "corpus_unreadable",
            &format!("Cannot read labeled cases from `{source}`: {detail}"),
            vec![
                "Provide a readable JSON or CSV file of labeled cases.".to_string(),
                "Use `-` as the path to read from stdin.".to_string(),
            ],
        )
    }

    pub fn corpus_format(message: &str, received_format: &str) -> Self {
        Self::new(
            "corpus_format",
            message,
            vec![
                "Provide a JSON array of case objects or a CSV with headers.".to_string(),
                "Run `perdiem eval --help` for the case schema.".to_string(),
            ],
        )
        .with_data(json!({
            "received_format": received_format,
            "supported_formats": ["json_array", "csv"],
        }))
    }

    pub fn corpus_invalid_rows(rows_total: usize, issues: Vec<CorpusIssue>) -> Self {
        Self::new(
            "corpus_invalid_rows",
            &format!(
                "Corpus failed validation: {} of {rows_total} rows need fixes. Nothing was \
                 evaluated.",
                issues.len()
            ),
            vec![
                "Fix the listed rows in your corpus file.".to_string(),
                "Rerun `perdiem eval <path>`.".to_string(),
            ],
        )
        .with_data(json!({
            "issues": issues,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
