use std::path::Path;

use crate::EngineResult;
use crate::tariff::{TARIFF_V1, Tariff, load_tariff_artifact};

pub(crate) const BUILT_IN_TARIFF_SOURCE: &str = "built-in";

/// Resolves the tariff the command will compute with: an explicit
/// artifact path when given (loaded fail-closed), otherwise the frozen
/// built-in table. The returned label lands in every output so results
/// are traceable to their constants.
pub(crate) fn active_tariff(artifact_path: Option<&Path>) -> EngineResult<(Tariff, String)> {
    match artifact_path {
        Some(path) => {
            let tariff = load_tariff_artifact(path)?;
            Ok((tariff, path.display().to_string()))
        }
        None => Ok((TARIFF_V1, BUILT_IN_TARIFF_SOURCE.to_string())),
    }
}
