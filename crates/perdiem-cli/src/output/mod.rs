mod compute_text;
mod error_text;
mod eval_text;
mod format;
mod json;
mod mode;
mod tariff_text;

use std::io;

use perdiem_engine::{EngineError, SuccessEnvelope};

use crate::stdout_io::write_stdout;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout(&body, true)
}

pub fn print_failure(error: &EngineError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout(&body, true)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "compute" => compute_text::render_compute(&success.data),
        "eval" => eval_text::render_eval(&success.data),
        "tariff show" => tariff_text::render_tariff(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
