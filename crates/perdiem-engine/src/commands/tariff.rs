use std::path::Path;

use crate::commands::common::active_tariff;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::tariff_data;
use crate::error::EngineResult;

/// Shows the constant table the engine would compute with, for audit.
pub fn show(tariff_path: Option<&Path>) -> EngineResult<SuccessEnvelope> {
    let (tariff, source) = active_tariff(tariff_path)?;
    success("tariff show", tariff_data(&tariff, &source))
}
