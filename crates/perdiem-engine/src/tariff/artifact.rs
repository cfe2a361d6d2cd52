use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::money::{Cents, parse_fixed};
use crate::tariff::{ReceiptBand, TARIFF_VERSION, Tariff};

/// On-disk shape of a fitted tariff. Every field is required, unknown
/// fields are rejected, and all numbers travel as decimal strings so the
/// artifact parses to the same exact integers on every platform.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TariffArtifact {
    version: String,
    per_diem_rate: String,
    mileage_tier1_boundary_miles: String,
    mileage_tier2_boundary_miles: String,
    mileage_tier1_rate: String,
    mileage_tier2_rate: String,
    mileage_tier3_rate: String,
    short_trip_max_days: u32,
    medium_trip_max_days: u32,
    short_receipts: BandArtifact,
    medium_receipts: BandArtifact,
    long_receipts: BandArtifact,
    five_day_duration: u32,
    five_day_bonus: String,
    low_receipt_threshold: String,
    low_receipt_penalty: String,
    high_spend_threshold_per_day: String,
    high_spend_factor: String,
    efficiency_min_miles_per_day: String,
    efficiency_max_miles_per_day: String,
    efficiency_factor: String,
    artifact_bonus: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BandArtifact {
    high_threshold: String,
    mid_threshold: String,
    high_rate: String,
    mid_rate: String,
    low_rate: String,
}

/// Loads a tariff override from a versioned JSON artifact.
///
/// Fail closed: an unreadable file, an unexpected version, any missing or
/// mistyped field, or an unsound constant refuses to produce a tariff
/// at all.
pub fn load_tariff_artifact(path: &Path) -> EngineResult<Tariff> {
    let content = fs::read_to_string(path)
        .map_err(|err| EngineError::tariff_unreadable(path, &err.to_string()))?;

    let artifact = serde_json::from_str::<TariffArtifact>(&content)
        .map_err(|err| EngineError::tariff_malformed(path, &err.to_string()))?;

    if artifact.version != TARIFF_VERSION {
        return Err(EngineError::tariff_malformed(
            path,
            &format!(
                "unsupported version `{}` (expected `{TARIFF_VERSION}`)",
                artifact.version
            ),
        ));
    }

    let tariff = convert(&artifact).map_err(|detail| EngineError::tariff_malformed(path, &detail))?;

    tariff
        .validate()
        .map_err(|problems| EngineError::tariff_unsound(path, problems))?;

    Ok(tariff)
}

fn convert(artifact: &TariffArtifact) -> Result<Tariff, String> {
    Ok(Tariff {
        per_diem_rate: dollars("per_diem_rate", &artifact.per_diem_rate)?,

        mileage_tier1_boundary_milli: scaled(
            "mileage_tier1_boundary_miles",
            &artifact.mileage_tier1_boundary_miles,
            3,
        )?,
        mileage_tier2_boundary_milli: scaled(
            "mileage_tier2_boundary_miles",
            &artifact.mileage_tier2_boundary_miles,
            3,
        )?,
        mileage_tier1_rate_cents: scaled("mileage_tier1_rate", &artifact.mileage_tier1_rate, 2)?,
        mileage_tier2_rate_cents: scaled("mileage_tier2_rate", &artifact.mileage_tier2_rate, 2)?,
        mileage_tier3_rate_cents: scaled("mileage_tier3_rate", &artifact.mileage_tier3_rate, 2)?,

        short_trip_max_days: artifact.short_trip_max_days,
        medium_trip_max_days: artifact.medium_trip_max_days,
        short_receipts: band("short_receipts", &artifact.short_receipts)?,
        medium_receipts: band("medium_receipts", &artifact.medium_receipts)?,
        long_receipts: band("long_receipts", &artifact.long_receipts)?,

        five_day_duration: artifact.five_day_duration,
        five_day_bonus: dollars("five_day_bonus", &artifact.five_day_bonus)?,
        low_receipt_threshold: dollars("low_receipt_threshold", &artifact.low_receipt_threshold)?,
        low_receipt_penalty: dollars("low_receipt_penalty", &artifact.low_receipt_penalty)?,
        high_spend_threshold_per_day: dollars(
            "high_spend_threshold_per_day",
            &artifact.high_spend_threshold_per_day,
        )?,
        high_spend_factor_pct: scaled("high_spend_factor", &artifact.high_spend_factor, 2)?,
        efficiency_min_milli_per_day: scaled(
            "efficiency_min_miles_per_day",
            &artifact.efficiency_min_miles_per_day,
            3,
        )?,
        efficiency_max_milli_per_day: scaled(
            "efficiency_max_miles_per_day",
            &artifact.efficiency_max_miles_per_day,
            3,
        )?,
        efficiency_factor_pct: scaled("efficiency_factor", &artifact.efficiency_factor, 2)?,
        artifact_bonus: dollars("artifact_bonus", &artifact.artifact_bonus)?,
    })
}

fn band(class: &str, artifact: &BandArtifact) -> Result<ReceiptBand, String> {
    Ok(ReceiptBand {
        high_threshold: dollars(class, &artifact.high_threshold)?,
        mid_threshold: dollars(class, &artifact.mid_threshold)?,
        high_rate_bp: scaled(class, &artifact.high_rate, 4)?,
        mid_rate_bp: scaled(class, &artifact.mid_rate, 4)?,
        low_rate_bp: scaled(class, &artifact.low_rate, 4)?,
    })
}

fn dollars(field: &str, value: &str) -> Result<Cents, String> {
    parse_fixed(value, 2)
        .map(Cents::new)
        .map_err(|reason| format!("field `{field}`: {reason}"))
}

fn scaled(field: &str, value: &str, fraction_digits: u32) -> Result<i64, String> {
    parse_fixed(value, fraction_digits).map_err(|reason| format!("field `{field}`: {reason}"))
}
