use perdiem_engine::EngineError;
use serde_json::Value;

pub fn render_error(error: &EngineError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    // Per-row corpus problems and tariff validation problems ride in the
    // structured data; surface them so the user does not need --json.
    for detail in detail_lines(error) {
        lines.push(format!("    {detail}"));
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());

    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

fn detail_lines(error: &EngineError) -> Vec<String> {
    let Some(data) = error.data.as_ref() else {
        return Vec::new();
    };

    if let Some(problems) = data.get("problems").and_then(Value::as_array) {
        return problems
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
    }

    if let Some(issues) = data.get("issues").and_then(Value::as_array) {
        return issues
            .iter()
            .map(|issue| {
                let row = issue.get("row").and_then(Value::as_i64).unwrap_or(0);
                let message = issue.get("message").and_then(Value::as_str).unwrap_or("");
                format!("row {row}: {message}")
            })
            .collect();
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use perdiem_engine::EngineError;
    use serde_json::json;

    use super::render_error;

    #[test]
    fn renders_standard_error_layout() {
        let error = EngineError::invalid_argument_for_command("bad input", Some("compute"));

        let rendered = render_error(&error);
        assert!(rendered.starts_with("Something went wrong, but it's easy to fix."));
        assert!(rendered.contains("  Error:    invalid_argument"));
        assert!(rendered.contains("  Details:  bad input"));
        assert!(rendered.contains("What to do next:"));
        assert!(rendered.contains("  1. Run `perdiem compute --help` for usage."));
    }

    #[test]
    fn lists_corpus_issues_inline() {
        let error = EngineError::new(
            "corpus_invalid",
            "2 rows failed validation",
            vec!["Fix the listed rows and rerun.".to_string()],
        )
        .with_data(json!({
            "issues": [
                { "row": 3, "message": "days must be a positive integer" },
                { "row": 7, "message": "receipts must not be negative" },
            ]
        }));

        let rendered = render_error(&error);
        assert!(rendered.contains("    row 3: days must be a positive integer"));
        assert!(rendered.contains("    row 7: receipts must not be negative"));
    }

    #[test]
    fn lists_tariff_problems_inline() {
        let error = EngineError::new(
            "tariff_unsound",
            "constants are unsound",
            vec!["Fix the artifact.".to_string()],
        )
        .with_data(json!({ "problems": ["per_diem_rate must be positive"] }));

        let rendered = render_error(&error);
        assert!(rendered.contains("    per_diem_rate must be positive"));
    }
}
