use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_eval(data: &Value) -> io::Result<String> {
    let cases_total = require_u64(data, "cases_total")?;

    let mut lines = vec![
        format!("Evaluated {cases_total} cases from {}.", require_str(data, "source")?),
        String::new(),
        "Results:".to_string(),
    ];
    lines.extend(format::key_value_rows(
        &[
            (
                "Exact matches:",
                format!(
                    "{} ({})",
                    require_u64(data, "exact_matches")?,
                    percentage(require_u64(data, "exact_matches")?, cases_total)
                ),
            ),
            (
                "Close matches:",
                format!(
                    "{} ({})",
                    require_u64(data, "close_matches")?,
                    percentage(require_u64(data, "close_matches")?, cases_total)
                ),
            ),
            (
                "Mean error:",
                format!("${}", require_str(data, "mean_absolute_error")?),
            ),
            ("Max error:", format!("${}", require_str(data, "max_error")?)),
            ("Score:", require_str(data, "score")?.to_string()),
        ],
        2,
    ));

    let worst = data
        .get("worst_cases")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if !worst.is_empty() {
        lines.push(String::new());
        lines.push("Worst cases:".to_string());
        lines.extend(worst_case_table(&worst));
    }

    lines.push(String::new());
    lines.push(format!(
        "Tariff: {} ({})",
        require_str(data, "tariff_version")?,
        require_str(data, "tariff_source")?
    ));

    Ok(lines.join("\n"))
}

fn worst_case_table(rows: &[Value]) -> Vec<String> {
    let columns = [
        Column {
            name: "Row",
            align: Align::Right,
        },
        Column {
            name: "Days",
            align: Align::Right,
        },
        Column {
            name: "Miles",
            align: Align::Right,
        },
        Column {
            name: "Receipts",
            align: Align::Right,
        },
        Column {
            name: "Expected",
            align: Align::Right,
        },
        Column {
            name: "Actual",
            align: Align::Right,
        },
        Column {
            name: "Error",
            align: Align::Right,
        },
    ];

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                cell(row, "row"),
                cell(row, "days"),
                cell(row, "miles"),
                cell(row, "receipts"),
                cell(row, "expected"),
                cell(row, "actual"),
                cell(row, "error"),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(&columns, &table_rows)
}

fn cell(row: &Value, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

// Integer percentage is enough for a progress readout.
fn percentage(part: u64, whole: u64) -> String {
    if whole == 0 {
        return "0%".to_string();
    }
    format!("{}%", part * 100 / whole)
}

fn require_str<'a>(data: &'a Value, key: &str) -> io::Result<&'a str> {
    data.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other(format!("eval output requires `{key}`")))
}

fn require_u64(data: &Value, key: &str) -> io::Result<u64> {
    data.get(key)
        .and_then(Value::as_u64)
        .ok_or_else(|| io::Error::other(format!("eval output requires `{key}`")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_eval;

    fn eval_payload() -> serde_json::Value {
        json!({
            "tariff_version": "tariff/v1",
            "tariff_source": "built-in",
            "source": "cases.json",
            "cases_total": 3,
            "exact_matches": 1,
            "close_matches": 2,
            "mean_absolute_error": "1.93",
            "max_error": "5.79",
            "score": "193.1",
            "worst_cases": [
                {
                    "row": 3,
                    "days": 8,
                    "miles": "795.000",
                    "receipts": "1645.99",
                    "expected": "1500.00",
                    "actual": "1494.21",
                    "error": "5.79"
                }
            ]
        })
    }

    #[test]
    fn renders_summary_and_worst_case_table() {
        let rendered = render_eval(&eval_payload());
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Evaluated 3 cases from cases.json."));
            assert!(text.contains("Exact matches:  1 (33%)"));
            assert!(text.contains("Mean error:"));
            assert!(text.contains("$1.93"));
            assert!(text.contains("Score:"));
            assert!(text.contains("193.1"));
            assert!(text.contains("Worst cases:"));
            assert!(text.contains("1494.21"));
            assert!(text.contains("Tariff: tariff/v1 (built-in)"));
        }
    }

    #[test]
    fn omits_worst_cases_when_every_case_is_exact() {
        let mut payload = eval_payload();
        payload["worst_cases"] = json!([]);

        let rendered = render_eval(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(!text.contains("Worst cases:"));
        }
    }

    #[test]
    fn missing_score_is_an_error() {
        let mut payload = eval_payload();
        if let Some(object) = payload.as_object_mut() {
            object.remove("score");
        }

        assert!(render_eval(&payload).is_err());
    }
}
