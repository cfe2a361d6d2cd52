use std::path::Path;

use crate::commands::common::active_tariff;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{EvalCaseRow, EvalData};
use crate::corpus::{LabeledCase, parse_corpus, resolve_source};
use crate::engine::compute_amount;
use crate::error::EngineResult;
use crate::money::{Cents, format_fixed, mul_div_half_even};
use crate::tariff::{TARIFF_VERSION, Tariff};

/// A case matches exactly within one cent and closely within one dollar,
/// the tolerances the original calibration harness scored against.
const EXACT_TOLERANCE: Cents = Cents::new(1);
const CLOSE_TOLERANCE: Cents = Cents::new(100);
const WORST_CASES_SHOWN: usize = 5;

/// Batch-evaluates a labeled corpus and reports aggregate error.
///
/// This is a test client of the engine's public contract: it feeds every
/// case through the same `compute` the CLI uses and never adjusts the
/// tariff. `-` as the path reads the corpus from stdin.
pub fn run(path: &str, tariff_path: Option<&Path>) -> EngineResult<SuccessEnvelope> {
    run_with_stdin(path, tariff_path, None)
}

#[doc(hidden)]
pub fn run_with_stdin(
    path: &str,
    tariff_path: Option<&Path>,
    stdin_override: Option<String>,
) -> EngineResult<SuccessEnvelope> {
    let (tariff, tariff_source) = active_tariff(tariff_path)?;
    let resolved = resolve_source(path, stdin_override)?;
    let cases = parse_corpus(&resolved.content)?;

    let data = aggregate(&cases, &tariff, &tariff_source, &resolved.source_label);
    success("eval", data)
}

fn aggregate(
    cases: &[LabeledCase],
    tariff: &Tariff,
    tariff_source: &str,
    source_label: &str,
) -> EvalData {
    let mut exact_matches = 0usize;
    let mut close_matches = 0usize;
    let mut total_error_cents = 0i64;
    let mut max_error = Cents::ZERO;
    let mut scored = Vec::with_capacity(cases.len());

    for case in cases {
        let actual = compute_amount(&case.trip, tariff);
        let error = actual.abs_diff(case.expected);
        if error <= EXACT_TOLERANCE {
            exact_matches += 1;
        }
        if error <= CLOSE_TOLERANCE {
            close_matches += 1;
        }
        total_error_cents += error.as_i64();
        max_error = max_error.max(error);
        scored.push((error, case, actual));
    }

    let cases_total = cases.len();
    let mean_absolute_error = Cents::new(mul_div_half_even(
        total_error_cents,
        1,
        cases_total.max(1) as i64,
    ));

    // avg error in dollars x 100 plus a tenth of a point per inexact
    // case, tracked in integer tenths; scored from the unrounded error
    // sum so sub-cent precision survives the rounding of the mean
    let score_tenths = mul_div_half_even(total_error_cents, 10, cases_total.max(1) as i64)
        + (cases_total - exact_matches) as i64;

    scored.sort_by(|left, right| {
        right
            .0
            .cmp(&left.0)
            .then_with(|| left.1.row.cmp(&right.1.row))
    });
    let worst_cases = scored
        .iter()
        .filter(|(error, _, _)| *error > EXACT_TOLERANCE)
        .take(WORST_CASES_SHOWN)
        .map(|(error, case, actual)| EvalCaseRow {
            row: case.row,
            days: case.trip.days(),
            miles: format_fixed(case.trip.miles_milli(), 3),
            receipts: case.trip.receipts().to_string(),
            expected: case.expected.to_string(),
            actual: actual.to_string(),
            error: error.to_string(),
        })
        .collect::<Vec<EvalCaseRow>>();

    EvalData {
        tariff_version: TARIFF_VERSION.to_string(),
        tariff_source: tariff_source.to_string(),
        source: source_label.to_string(),
        cases_total,
        exact_matches,
        close_matches,
        mean_absolute_error: mean_absolute_error.to_string(),
        max_error: max_error.to_string(),
        score: format_fixed(score_tenths, 1),
        worst_cases,
    }
}
