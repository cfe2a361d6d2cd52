use std::io;

use serde_json::Value;

use super::format::key_value_rows;

pub fn render_compute(data: &Value) -> io::Result<String> {
    let total = require_str(data, "total")?;

    let mut lines = vec![
        format!("Reimbursement: ${total}"),
        String::new(),
        "Trip:".to_string(),
    ];
    lines.extend(key_value_rows(
        &[
            ("Days:", data.get("days").map(Value::to_string).unwrap_or_default()),
            ("Miles:", require_str(data, "miles")?.to_string()),
            ("Receipts:", format!("${}", require_str(data, "receipts")?)),
            ("Class:", require_str(data, "trip_length_class")?.to_string()),
        ],
        2,
    ));

    lines.push(String::new());
    lines.push("Breakdown:".to_string());
    lines.extend(key_value_rows(
        &[
            ("Per diem:", format!("${}", require_str(data, "per_diem")?)),
            ("Mileage:", format!("${}", require_str(data, "mileage")?)),
            (
                "Receipt portion:",
                format!("${}", require_str(data, "receipt_component")?),
            ),
        ],
        2,
    ));

    lines.push(String::new());
    lines.push("Adjustments applied:".to_string());
    let applied = applied_adjustments(data);
    if applied.is_empty() {
        lines.push("  none".to_string());
    } else {
        for name in applied {
            lines.push(format!("  {name}"));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Tariff: {} ({})",
        require_str(data, "tariff_version")?,
        require_str(data, "tariff_source")?
    ));

    Ok(lines.join("\n"))
}

fn applied_adjustments(data: &Value) -> Vec<&'static str> {
    let labels: [(&str, &str); 5] = [
        ("five_day_bonus", "five-day bonus"),
        ("low_receipt_penalty", "low-receipt penalty"),
        ("high_spend_penalty", "high-spend penalty"),
        ("efficiency_bonus", "efficiency bonus"),
        ("artifact_bonus", "rounding-artifact bonus"),
    ];

    let adjustments = data.get("adjustments");
    labels
        .iter()
        .filter(|(key, _)| {
            adjustments
                .and_then(|value| value.get(key))
                .and_then(Value::as_bool)
                .unwrap_or(false)
        })
        .map(|(_, label)| *label)
        .collect()
}

fn require_str<'a>(data: &'a Value, key: &str) -> io::Result<&'a str> {
    data.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other(format!("compute output requires `{key}`")))
}
