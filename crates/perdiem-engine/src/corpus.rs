use std::collections::HashMap;
use std::fs;
use std::io::{IsTerminal, Read};

use serde_json::Value;

use crate::contracts::types::CorpusIssue;
use crate::error::{EngineError, EngineResult};
use crate::money::{Cents, parse_dollars};
use crate::trip::Trip;

const CORPUS_FIELDS: [&str; 4] = ["days", "miles", "receipts", "expected"];

/// One labeled example from the calibration corpus: a trip plus the
/// amount the opaque legacy system produced for it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LabeledCase {
    pub(crate) row: i64,
    pub(crate) trip: Trip,
    pub(crate) expected: Cents,
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedCorpus {
    pub(crate) source_label: String,
    pub(crate) content: String,
}

/// Resolves the eval source argument: `-` reads stdin, anything else is a
/// file path.
pub(crate) fn resolve_source(
    path: &str,
    stdin_override: Option<String>,
) -> EngineResult<ResolvedCorpus> {
    if path == "-" {
        let content = match stdin_override {
            Some(value) => value,
            None => read_stdin()?,
        };
        if content.trim().is_empty() {
            return Err(EngineError::corpus_unreadable(
                "-",
                "stdin is empty; pipe a JSON or CSV corpus into the command",
            ));
        }
        return Ok(ResolvedCorpus {
            source_label: "stdin".to_string(),
            content,
        });
    }

    let content = fs::read_to_string(path)
        .map_err(|err| EngineError::corpus_unreadable(path, &err.to_string()))?;
    Ok(ResolvedCorpus {
        source_label: path.to_string(),
        content,
    })
}

fn read_stdin() -> EngineResult<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(EngineError::corpus_unreadable(
            "-",
            "stdin is a terminal; pipe a JSON or CSV corpus into the command",
        ));
    }
    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .map_err(|err| EngineError::corpus_unreadable("-", &err.to_string()))?;
    Ok(buffer)
}

/// Parses a labeled corpus from a JSON array or a headered CSV.
///
/// JSON rows may use either the flat `{days, miles, receipts, expected}`
/// shape or the legacy export shape
/// `{"input": {trip_duration_days, miles_traveled, total_receipts_amount},
/// "expected_output": …}`. All rows must validate or nothing is
/// evaluated; every bad row is reported with its position.
pub(crate) fn parse_corpus(content: &str) -> EngineResult<Vec<LabeledCase>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(EngineError::corpus_format("Corpus is empty.", "empty"));
    }

    let raw_rows = if trimmed.starts_with('[') {
        parse_json_array(trimmed)?
    } else if looks_like_csv(trimmed) {
        parse_csv(trimmed)?
    } else if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(EngineError::corpus_format(
            "JSON input must be a top-level array of case objects.",
            "json_non_array",
        ));
    } else {
        return Err(EngineError::corpus_format(
            "Unsupported corpus format. Provide a JSON array or CSV with headers.",
            "unknown",
        ));
    };

    if raw_rows.is_empty() {
        return Err(EngineError::corpus_format(
            "Corpus contains no cases.",
            "empty",
        ));
    }

    let rows_total = raw_rows.len();
    let mut cases = Vec::with_capacity(rows_total);
    let mut issues = Vec::new();
    for raw in raw_rows {
        match validate_row(&raw) {
            Ok(case) => cases.push(case),
            Err(message) => issues.push(CorpusIssue {
                row: raw.row,
                message,
            }),
        }
    }

    if issues.is_empty() {
        Ok(cases)
    } else {
        Err(EngineError::corpus_invalid_rows(rows_total, issues))
    }
}

#[derive(Debug, Clone)]
struct RawCase {
    row: i64,
    days: Option<String>,
    miles: Option<String>,
    receipts: Option<String>,
    expected: Option<String>,
}

fn validate_row(raw: &RawCase) -> Result<LabeledCase, String> {
    let days = raw.days.as_deref().ok_or("missing field `days`")?;
    let miles = raw.miles.as_deref().ok_or("missing field `miles`")?;
    let receipts = raw.receipts.as_deref().ok_or("missing field `receipts`")?;
    let expected_text = raw.expected.as_deref().ok_or("missing field `expected`")?;

    let trip = Trip::parse(days, miles, receipts)?;
    let expected =
        parse_dollars(expected_text).map_err(|reason| format!("invalid expected amount: {reason}"))?;

    Ok(LabeledCase {
        row: raw.row,
        trip,
        expected,
    })
}

fn parse_json_array(content: &str) -> EngineResult<Vec<RawCase>> {
    let parsed = serde_json::from_str::<Value>(content).map_err(|_| {
        EngineError::corpus_format("Invalid JSON input. Provide a valid JSON array.", "json")
    })?;

    let Some(items) = parsed.as_array() else {
        return Err(EngineError::corpus_format(
            "JSON input must be a top-level array of case objects.",
            "json_non_array",
        ));
    };

    let mut rows = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let row = (index as i64) + 1;
        let Some(object) = item.as_object() else {
            return Err(EngineError::corpus_format(
                "JSON array entries must all be objects with case fields.",
                "json_non_object_entry",
            ));
        };

        // legacy export shape nests the inputs under `input`
        if let Some(input) = object.get("input").and_then(Value::as_object) {
            rows.push(RawCase {
                row,
                days: read_value(input.get("trip_duration_days")),
                miles: read_value(input.get("miles_traveled")),
                receipts: read_value(input.get("total_receipts_amount")),
                expected: read_value(object.get("expected_output")),
            });
            continue;
        }

        rows.push(RawCase {
            row,
            days: read_value(object.get("days")),
            miles: read_value(object.get("miles")),
            receipts: read_value(object.get("receipts")),
            expected: read_value(object.get("expected")),
        });
    }

    Ok(rows)
}

fn parse_csv(content: &str) -> EngineResult<Vec<RawCase>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| {
            EngineError::corpus_format("CSV header row is missing or unreadable.", "csv")
        })?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    if !headers_are_valid(&headers) {
        return Err(EngineError::corpus_format(
            &format!(
                "CSV headers must be exactly: {}.",
                CORPUS_FIELDS.join(", ")
            ),
            "csv_schema_mismatch",
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record = result_row.map_err(|_| {
            EngineError::corpus_format("CSV rows are malformed or not UTF-8.", "csv")
        })?;

        rows.push(RawCase {
            row: (row_index as i64) + 1,
            days: value_for(&record, &index_by_name, "days"),
            miles: value_for(&record, &index_by_name, "miles"),
            receipts: value_for(&record, &index_by_name, "receipts"),
            expected: value_for(&record, &index_by_name, "expected"),
        });
    }

    Ok(rows)
}

fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<String, usize>,
    field_name: &str,
) -> Option<String> {
    let index = index_by_name.get(field_name)?;
    let value = record.get(*index)?.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

fn read_value(value: Option<&Value>) -> Option<String> {
    let current = value?;
    if current.is_null() {
        return None;
    }
    if let Some(text) = current.as_str() {
        return Some(text.to_string());
    }
    if let Some(number) = current.as_number() {
        return Some(number.to_string());
    }
    Some(current.to_string())
}

fn looks_like_csv(content: &str) -> bool {
    let Some(first_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return false;
    };
    first_line.contains(',')
}

fn headers_are_valid(actual_headers: &[String]) -> bool {
    for required in CORPUS_FIELDS {
        if !actual_headers.iter().any(|value| value == required) {
            return false;
        }
    }
    actual_headers
        .iter()
        .all(|header| CORPUS_FIELDS.contains(&header.as_str()))
}

#[cfg(test)]
mod tests {
    use super::parse_corpus;
    use crate::money::Cents;

    #[test]
    fn parses_flat_json_cases() {
        let parsed = parse_corpus(
            r#"[
                {"days": 3, "miles": 93, "receipts": 1.42, "expected": 329.51},
                {"days": "5", "miles": "500", "receipts": "200.00", "expected": "867.00"}
            ]"#,
        );
        assert!(parsed.is_ok());
        if let Ok(cases) = parsed {
            assert_eq!(cases.len(), 2);
            assert_eq!(cases[0].trip.days(), 3);
            assert_eq!(cases[0].expected, Cents::new(32951));
            assert_eq!(cases[1].trip.miles_milli(), 500_000);
        }
    }

    #[test]
    fn parses_legacy_export_shape() {
        let parsed = parse_corpus(
            r#"[
                {
                    "input": {
                        "trip_duration_days": 8,
                        "miles_traveled": 795,
                        "total_receipts_amount": 1645.99
                    },
                    "expected_output": 1494.21
                }
            ]"#,
        );
        assert!(parsed.is_ok());
        if let Ok(cases) = parsed {
            assert_eq!(cases.len(), 1);
            assert_eq!(cases[0].trip.receipts(), Cents::new(164_599));
            assert_eq!(cases[0].expected, Cents::new(149_421));
        }
    }

    #[test]
    fn parses_csv_with_exact_headers() {
        let parsed = parse_corpus("days,miles,receipts,expected\n3,93,1.42,329.51\n");
        assert!(parsed.is_ok());
        if let Ok(cases) = parsed {
            assert_eq!(cases.len(), 1);
            assert_eq!(cases[0].trip.days(), 3);
        }
    }

    #[test]
    fn rejects_csv_with_unknown_headers() {
        let parsed = parse_corpus("days,miles,receipts,expected,notes\n3,93,1.42,329.51,x\n");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "corpus_format");
        }
    }

    #[test]
    fn collects_issues_for_every_bad_row() {
        let parsed = parse_corpus(
            r#"[
                {"days": 0, "miles": 93, "receipts": 1.42, "expected": 329.51},
                {"days": 3, "miles": 93, "receipts": 1.42},
                {"days": 3, "miles": 93, "receipts": 1.42, "expected": 329.51}
            ]"#,
        );
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "corpus_invalid_rows");
            let issues = error
                .data
                .as_ref()
                .and_then(|data| data.get("issues"))
                .and_then(|issues| issues.as_array())
                .map(Vec::len);
            assert_eq!(issues, Some(2));
        }
    }

    #[test]
    fn rejects_non_array_json_and_unknown_formats() {
        let object = parse_corpus(r#"{"days": 3}"#);
        assert!(object.is_err());
        if let Err(error) = object {
            assert_eq!(error.code, "corpus_format");
        }

        let garbage = parse_corpus("not json and no commas");
        assert!(garbage.is_err());

        let empty = parse_corpus("   ");
        assert!(empty.is_err());
    }
}
