use std::path::Path;

use crate::commands::common::active_tariff;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::compute_data;
use crate::engine::compute;
use crate::error::{EngineError, EngineResult};
use crate::trip::Trip;

/// Evaluates one `(days, miles, receipts)` triple against the active
/// tariff. The three arguments arrive as raw strings and are validated
/// here, at the boundary; the engine itself never sees a malformed or
/// out-of-domain input.
pub fn run(
    days: &str,
    miles: &str,
    receipts: &str,
    tariff_path: Option<&Path>,
) -> EngineResult<SuccessEnvelope> {
    let (tariff, tariff_source) = active_tariff(tariff_path)?;

    let trip = Trip::parse(days, miles, receipts)
        .map_err(|reason| EngineError::invalid_argument_for_command(&reason, Some("compute")))?;

    let evaluation = compute(&trip, &tariff);
    success("compute", compute_data(&trip, &evaluation, &tariff_source))
}
