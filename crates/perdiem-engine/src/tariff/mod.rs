mod artifact;

pub use artifact::load_tariff_artifact;

use crate::money::Cents;

/// Deterministic reimbursement tariff identifier.
///
/// Emitted with every compute and eval result so future constant changes
/// remain auditable and easy to reason about in diffs and support/debug
/// sessions.
pub const TARIFF_VERSION: &str = "tariff/v1";

/// Trip-length bucket used to select the receipt-rate band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripLengthClass {
    Short,
    Medium,
    Long,
}

impl TripLengthClass {
    pub fn as_str(self) -> &'static str {
        match self {
            TripLengthClass::Short => "short",
            TripLengthClass::Medium => "medium",
            TripLengthClass::Long => "long",
        }
    }
}

/// Receipt-rate selection for one trip-length class: two thresholds,
/// highest checked first, picking a basis-point rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptBand {
    pub high_threshold: Cents,
    pub mid_threshold: Cents,
    pub high_rate_bp: i64,
    pub mid_rate_bp: i64,
    pub low_rate_bp: i64,
}

impl ReceiptBand {
    pub fn rate_bp(&self, receipts: Cents) -> i64 {
        if receipts > self.high_threshold {
            self.high_rate_bp
        } else if receipts > self.mid_threshold {
            self.mid_rate_bp
        } else {
            self.low_rate_bp
        }
    }
}

/// The complete constant table consumed by the engine.
///
/// Produced offline by the fitting runs and frozen here; the engine never
/// learns or adjusts these at runtime. Mileage boundaries and the
/// efficiency window are milli-miles, money fields are cents, receipt
/// rates are basis points, and the two multiplicative factors are whole
/// percentages, so every application of the table is exact integer math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tariff {
    pub per_diem_rate: Cents,

    pub mileage_tier1_boundary_milli: i64,
    pub mileage_tier2_boundary_milli: i64,
    pub mileage_tier1_rate_cents: i64,
    pub mileage_tier2_rate_cents: i64,
    pub mileage_tier3_rate_cents: i64,

    pub short_trip_max_days: u32,
    pub medium_trip_max_days: u32,
    pub short_receipts: ReceiptBand,
    pub medium_receipts: ReceiptBand,
    pub long_receipts: ReceiptBand,

    pub five_day_duration: u32,
    pub five_day_bonus: Cents,
    pub low_receipt_threshold: Cents,
    pub low_receipt_penalty: Cents,
    pub high_spend_threshold_per_day: Cents,
    pub high_spend_factor_pct: i64,
    pub efficiency_min_milli_per_day: i64,
    pub efficiency_max_milli_per_day: i64,
    pub efficiency_factor_pct: i64,
    pub artifact_bonus: Cents,
}

impl Tariff {
    pub fn trip_length_class(&self, days: u32) -> TripLengthClass {
        if days <= self.short_trip_max_days {
            TripLengthClass::Short
        } else if days <= self.medium_trip_max_days {
            TripLengthClass::Medium
        } else {
            TripLengthClass::Long
        }
    }

    pub fn receipt_band(&self, days: u32) -> &ReceiptBand {
        match self.trip_length_class(days) {
            TripLengthClass::Short => &self.short_receipts,
            TripLengthClass::Medium => &self.medium_receipts,
            TripLengthClass::Long => &self.long_receipts,
        }
    }

    /// Checks every constant for presence-of-meaning: rates and bounds
    /// that would silently corrupt answers are rejected as a batch so a
    /// bad artifact fails closed with the full list of problems.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if self.per_diem_rate <= Cents::ZERO {
            problems.push("per_diem_rate must be positive".to_string());
        }
        if self.mileage_tier1_boundary_milli <= 0 {
            problems.push("mileage_tier1_boundary must be positive".to_string());
        }
        if self.mileage_tier2_boundary_milli <= self.mileage_tier1_boundary_milli {
            problems
                .push("mileage_tier2_boundary must be greater than tier 1 boundary".to_string());
        }
        for (name, rate) in [
            ("mileage_tier1_rate", self.mileage_tier1_rate_cents),
            ("mileage_tier2_rate", self.mileage_tier2_rate_cents),
            ("mileage_tier3_rate", self.mileage_tier3_rate_cents),
        ] {
            if rate <= 0 {
                problems.push(format!("{name} must be positive"));
            }
        }

        if self.short_trip_max_days == 0 {
            problems.push("short_trip_max_days must be at least 1".to_string());
        }
        if self.medium_trip_max_days <= self.short_trip_max_days {
            problems
                .push("medium_trip_max_days must be greater than short_trip_max_days".to_string());
        }
        for (class, band) in [
            ("short", &self.short_receipts),
            ("medium", &self.medium_receipts),
            ("long", &self.long_receipts),
        ] {
            if band.high_threshold <= band.mid_threshold {
                problems.push(format!(
                    "{class} receipt high threshold must be greater than the mid threshold"
                ));
            }
            for (name, rate) in [
                ("high", band.high_rate_bp),
                ("mid", band.mid_rate_bp),
                ("low", band.low_rate_bp),
            ] {
                if rate <= 0 || rate > 10_000 {
                    problems.push(format!(
                        "{class} receipt {name} rate must be between 1 and 10000 basis points"
                    ));
                }
            }
        }

        if self.five_day_duration == 0 {
            problems.push("five_day_duration must be at least 1".to_string());
        }
        if self.low_receipt_threshold <= Cents::ZERO {
            problems.push("low_receipt_threshold must be positive".to_string());
        }
        if self.high_spend_threshold_per_day <= Cents::ZERO {
            problems.push("high_spend_threshold_per_day must be positive".to_string());
        }
        if self.high_spend_factor_pct <= 0 || self.high_spend_factor_pct >= 100 {
            problems.push("high_spend_factor_pct must be between 1 and 99".to_string());
        }
        if self.efficiency_min_milli_per_day <= 0
            || self.efficiency_max_milli_per_day < self.efficiency_min_milli_per_day
        {
            problems.push(
                "efficiency window must be a non-empty range of positive miles per day"
                    .to_string(),
            );
        }
        if self.efficiency_factor_pct <= 100 {
            problems.push("efficiency_factor_pct must be greater than 100".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

/// v1 tariff, pinned from the best tiered fitting run against the public
/// corpus. Frozen; changes require a new version string and fresh fit
/// evidence.
pub const TARIFF_V1: Tariff = Tariff {
    per_diem_rate: Cents::new(100_00),

    mileage_tier1_boundary_milli: 100_000,
    mileage_tier2_boundary_milli: 400_000,
    mileage_tier1_rate_cents: 58,
    mileage_tier2_rate_cents: 48,
    mileage_tier3_rate_cents: 40,

    short_trip_max_days: 3,
    medium_trip_max_days: 7,
    short_receipts: ReceiptBand {
        high_threshold: Cents::new(1500_00),
        mid_threshold: Cents::new(500_00),
        high_rate_bp: 4500,
        mid_rate_bp: 5000,
        low_rate_bp: 4000,
    },
    medium_receipts: ReceiptBand {
        high_threshold: Cents::new(1500_00),
        mid_threshold: Cents::new(500_00),
        high_rate_bp: 4500,
        mid_rate_bp: 6000,
        low_rate_bp: 5000,
    },
    long_receipts: ReceiptBand {
        high_threshold: Cents::new(1000_00),
        mid_threshold: Cents::new(500_00),
        high_rate_bp: 2000,
        mid_rate_bp: 3000,
        low_rate_bp: 4000,
    },

    five_day_duration: 5,
    five_day_bonus: Cents::new(25_00),
    low_receipt_threshold: Cents::new(50_00),
    low_receipt_penalty: Cents::new(25_00),
    high_spend_threshold_per_day: Cents::new(500_00),
    high_spend_factor_pct: 50,
    efficiency_min_milli_per_day: 180_000,
    efficiency_max_milli_per_day: 220_000,
    efficiency_factor_pct: 115,
    artifact_bonus: Cents::new(5_01),
};
