use std::io;

use serde_json::Value;

use super::format::key_value_rows;

pub fn render_tariff(data: &Value) -> io::Result<String> {
    let mut lines = vec![
        format!(
            "Tariff {} ({})",
            require_str(data, "version")?,
            require_str(data, "source")?
        ),
        String::new(),
        "Base rates:".to_string(),
    ];
    lines.extend(key_value_rows(
        &[
            (
                "Per diem:",
                format!("${} per day", require_str(data, "per_diem_rate")?),
            ),
            (
                "Mileage tier 1:",
                format!(
                    "${} per mile up to {} miles",
                    require_str(data, "mileage_tier1_rate")?,
                    require_str(data, "mileage_tier1_boundary_miles")?
                ),
            ),
            (
                "Mileage tier 2:",
                format!(
                    "${} per mile up to {} miles",
                    require_str(data, "mileage_tier2_rate")?,
                    require_str(data, "mileage_tier2_boundary_miles")?
                ),
            ),
            (
                "Mileage tier 3:",
                format!("${} per mile beyond", require_str(data, "mileage_tier3_rate")?),
            ),
        ],
        2,
    ));

    lines.push(String::new());
    lines.push("Receipt rates:".to_string());
    for (key, label) in [
        ("short_receipts", "Short trips"),
        ("medium_receipts", "Medium trips"),
        ("long_receipts", "Long trips"),
    ] {
        let band = data
            .get(key)
            .ok_or_else(|| io::Error::other(format!("tariff output requires `{key}`")))?;
        lines.push(format!("  {label}:"));
        lines.extend(key_value_rows(
            &[
                (
                    "Over high threshold:",
                    format!(
                        "{} above ${}",
                        require_str(band, "high_rate")?,
                        require_str(band, "high_threshold")?
                    ),
                ),
                (
                    "Over mid threshold:",
                    format!(
                        "{} above ${}",
                        require_str(band, "mid_rate")?,
                        require_str(band, "mid_threshold")?
                    ),
                ),
                ("Otherwise:", require_str(band, "low_rate")?.to_string()),
            ],
            4,
        ));
    }

    lines.push(String::new());
    lines.push("Adjustments:".to_string());
    lines.extend(key_value_rows(
        &[
            (
                "Five-day bonus:",
                format!(
                    "${} at exactly {} days",
                    require_str(data, "five_day_bonus")?,
                    require_u64(data, "five_day_duration")?
                ),
            ),
            (
                "Low-receipt penalty:",
                format!(
                    "${} at or under ${}",
                    require_str(data, "low_receipt_penalty")?,
                    require_str(data, "low_receipt_threshold")?
                ),
            ),
            (
                "High-spend factor:",
                format!(
                    "{} over ${} per day",
                    require_str(data, "high_spend_factor")?,
                    require_str(data, "high_spend_threshold_per_day")?
                ),
            ),
            (
                "Efficiency factor:",
                format!(
                    "{} between {} and {} miles per day",
                    require_str(data, "efficiency_factor")?,
                    require_str(data, "efficiency_min_miles_per_day")?,
                    require_str(data, "efficiency_max_miles_per_day")?
                ),
            ),
            (
                "Artifact bonus:",
                format!("${}", require_str(data, "artifact_bonus")?),
            ),
        ],
        2,
    ));

    lines.push(String::new());
    lines.push(format!(
        "Trip classes: short to {} days, medium to {} days, long beyond.",
        require_u64(data, "short_trip_max_days")?,
        require_u64(data, "medium_trip_max_days")?
    ));

    Ok(lines.join("\n"))
}

fn require_str<'a>(data: &'a Value, key: &str) -> io::Result<&'a str> {
    data.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other(format!("tariff output requires `{key}`")))
}

fn require_u64(data: &Value, key: &str) -> io::Result<u64> {
    data.get(key)
        .and_then(Value::as_u64)
        .ok_or_else(|| io::Error::other(format!("tariff output requires `{key}`")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_tariff;

    fn band() -> serde_json::Value {
        json!({
            "high_threshold": "1500.00",
            "mid_threshold": "500.00",
            "high_rate": "0.4500",
            "mid_rate": "0.5000",
            "low_rate": "0.4000"
        })
    }

    fn tariff_payload() -> serde_json::Value {
        json!({
            "version": "tariff/v1",
            "source": "built-in",
            "per_diem_rate": "100.00",
            "mileage_tier1_boundary_miles": "100.000",
            "mileage_tier2_boundary_miles": "400.000",
            "mileage_tier1_rate": "0.58",
            "mileage_tier2_rate": "0.48",
            "mileage_tier3_rate": "0.40",
            "short_trip_max_days": 3,
            "medium_trip_max_days": 7,
            "short_receipts": band(),
            "medium_receipts": band(),
            "long_receipts": band(),
            "five_day_duration": 5,
            "five_day_bonus": "25.00",
            "low_receipt_threshold": "50.00",
            "low_receipt_penalty": "25.00",
            "high_spend_threshold_per_day": "500.00",
            "high_spend_factor": "0.50",
            "efficiency_min_miles_per_day": "180.000",
            "efficiency_max_miles_per_day": "220.000",
            "efficiency_factor": "1.15",
            "artifact_bonus": "5.01"
        })
    }

    #[test]
    fn renders_rates_bands_and_adjustments() {
        let rendered = render_tariff(&tariff_payload());
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Tariff tariff/v1 (built-in)"));
            assert!(text.contains("$0.58 per mile up to 100.000 miles"));
            assert!(text.contains("Short trips:"));
            assert!(text.contains("$25.00 at exactly 5 days"));
            assert!(text.contains("1.15 between 180.000 and 220.000 miles per day"));
            assert!(text.contains("Trip classes: short to 3 days, medium to 7 days, long beyond."));
        }
    }

    #[test]
    fn missing_band_is_an_error() {
        let mut payload = tariff_payload();
        if let Some(object) = payload.as_object_mut() {
            object.remove("long_receipts");
        }

        assert!(render_tariff(&payload).is_err());
    }
}
