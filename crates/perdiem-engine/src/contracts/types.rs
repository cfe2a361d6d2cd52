use serde::Serialize;

use crate::engine::{AdjustmentTrace, Evaluation};
use crate::money::format_fixed;
use crate::tariff::{ReceiptBand, TARIFF_VERSION, Tariff};
use crate::trip::Trip;

#[derive(Debug, Clone, Serialize)]
pub struct CorpusIssue {
    pub row: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComputeData {
    pub tariff_version: String,
    pub tariff_source: String,
    pub days: u32,
    pub miles: String,
    pub receipts: String,
    pub trip_length_class: String,
    pub per_diem: String,
    pub mileage: String,
    pub receipt_component: String,
    pub total: String,
    pub adjustments: AdjustmentFlags,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdjustmentFlags {
    pub five_day_bonus: bool,
    pub low_receipt_penalty: bool,
    pub high_spend_penalty: bool,
    pub efficiency_bonus: bool,
    pub artifact_bonus: bool,
}

impl AdjustmentFlags {
    pub fn from_trace(trace: &AdjustmentTrace) -> Self {
        AdjustmentFlags {
            five_day_bonus: trace.five_day_bonus,
            low_receipt_penalty: trace.low_receipt_penalty,
            high_spend_penalty: trace.high_spend_penalty,
            efficiency_bonus: trace.efficiency_bonus,
            artifact_bonus: trace.artifact_bonus,
        }
    }
}

pub fn compute_data(trip: &Trip, evaluation: &Evaluation, tariff_source: &str) -> ComputeData {
    ComputeData {
        tariff_version: TARIFF_VERSION.to_string(),
        tariff_source: tariff_source.to_string(),
        days: trip.days(),
        miles: format_fixed(trip.miles_milli(), 3),
        receipts: trip.receipts().to_string(),
        trip_length_class: evaluation.trip_length_class.as_str().to_string(),
        per_diem: evaluation.breakdown.per_diem.to_string(),
        mileage: evaluation.breakdown.mileage.to_string(),
        receipt_component: evaluation.breakdown.receipts.to_string(),
        total: evaluation.total.to_string(),
        adjustments: AdjustmentFlags::from_trace(&evaluation.trace),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EvalData {
    pub tariff_version: String,
    pub tariff_source: String,
    pub source: String,
    pub cases_total: usize,
    pub exact_matches: usize,
    pub close_matches: usize,
    pub mean_absolute_error: String,
    pub max_error: String,
    pub score: String,
    pub worst_cases: Vec<EvalCaseRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvalCaseRow {
    pub row: i64,
    pub days: u32,
    pub miles: String,
    pub receipts: String,
    pub expected: String,
    pub actual: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TariffData {
    pub version: String,
    pub source: String,
    pub per_diem_rate: String,
    pub mileage_tier1_boundary_miles: String,
    pub mileage_tier2_boundary_miles: String,
    pub mileage_tier1_rate: String,
    pub mileage_tier2_rate: String,
    pub mileage_tier3_rate: String,
    pub short_trip_max_days: u32,
    pub medium_trip_max_days: u32,
    pub short_receipts: ReceiptBandView,
    pub medium_receipts: ReceiptBandView,
    pub long_receipts: ReceiptBandView,
    pub five_day_duration: u32,
    pub five_day_bonus: String,
    pub low_receipt_threshold: String,
    pub low_receipt_penalty: String,
    pub high_spend_threshold_per_day: String,
    pub high_spend_factor: String,
    pub efficiency_min_miles_per_day: String,
    pub efficiency_max_miles_per_day: String,
    pub efficiency_factor: String,
    pub artifact_bonus: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReceiptBandView {
    pub high_threshold: String,
    pub mid_threshold: String,
    pub high_rate: String,
    pub mid_rate: String,
    pub low_rate: String,
}

fn band_view(band: &ReceiptBand) -> ReceiptBandView {
    ReceiptBandView {
        high_threshold: band.high_threshold.to_string(),
        mid_threshold: band.mid_threshold.to_string(),
        high_rate: format_fixed(band.high_rate_bp, 4),
        mid_rate: format_fixed(band.mid_rate_bp, 4),
        low_rate: format_fixed(band.low_rate_bp, 4),
    }
}

pub fn tariff_data(tariff: &Tariff, source: &str) -> TariffData {
    TariffData {
        version: TARIFF_VERSION.to_string(),
        source: source.to_string(),
        per_diem_rate: tariff.per_diem_rate.to_string(),
        mileage_tier1_boundary_miles: format_fixed(tariff.mileage_tier1_boundary_milli, 3),
        mileage_tier2_boundary_miles: format_fixed(tariff.mileage_tier2_boundary_milli, 3),
        mileage_tier1_rate: format_fixed(tariff.mileage_tier1_rate_cents, 2),
        mileage_tier2_rate: format_fixed(tariff.mileage_tier2_rate_cents, 2),
        mileage_tier3_rate: format_fixed(tariff.mileage_tier3_rate_cents, 2),
        short_trip_max_days: tariff.short_trip_max_days,
        medium_trip_max_days: tariff.medium_trip_max_days,
        short_receipts: band_view(&tariff.short_receipts),
        medium_receipts: band_view(&tariff.medium_receipts),
        long_receipts: band_view(&tariff.long_receipts),
        five_day_duration: tariff.five_day_duration,
        five_day_bonus: tariff.five_day_bonus.to_string(),
        low_receipt_threshold: tariff.low_receipt_threshold.to_string(),
        low_receipt_penalty: tariff.low_receipt_penalty.to_string(),
        high_spend_threshold_per_day: tariff.high_spend_threshold_per_day.to_string(),
        high_spend_factor: format_fixed(tariff.high_spend_factor_pct, 2),
        efficiency_min_miles_per_day: format_fixed(tariff.efficiency_min_milli_per_day, 3),
        efficiency_max_miles_per_day: format_fixed(tariff.efficiency_max_milli_per_day, 3),
        efficiency_factor: format_fixed(tariff.efficiency_factor_pct, 2),
        artifact_bonus: tariff.artifact_bonus.to_string(),
    }
}
