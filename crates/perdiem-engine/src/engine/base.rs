use crate::money::Cents;
use crate::tariff::Tariff;
use crate::trip::Trip;

/// Unadjusted component amounts produced by the base estimator.
///
/// The mileage component stays in exact milli-cents (milli-miles times a
/// cents-per-mile rate) until the pipeline has applied the efficiency
/// factor, so the component is rounded to cents exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BaseAmounts {
    pub(crate) per_diem: Cents,
    pub(crate) mileage_milli_cents: i64,
    pub(crate) receipts: Cents,
}

pub(crate) fn estimate(trip: &Trip, tariff: &Tariff) -> BaseAmounts {
    BaseAmounts {
        per_diem: per_diem(trip, tariff),
        mileage_milli_cents: mileage_milli_cents(trip.miles_milli(), tariff),
        receipts: receipt_contribution(trip, tariff),
    }
}

fn per_diem(trip: &Trip, tariff: &Tariff) -> Cents {
    Cents::new(tariff.per_diem_rate.as_i64() * i64::from(trip.days()))
}

/// Piecewise-linear mileage: tier rates apply to the miles inside each
/// tier, so the function is continuous at both boundaries.
fn mileage_milli_cents(miles_milli: i64, tariff: &Tariff) -> i64 {
    let tier1_span = miles_milli.min(tariff.mileage_tier1_boundary_milli);
    let tier2_span = (miles_milli - tariff.mileage_tier1_boundary_milli)
        .clamp(0, tariff.mileage_tier2_boundary_milli - tariff.mileage_tier1_boundary_milli);
    let tier3_span = (miles_milli - tariff.mileage_tier2_boundary_milli).max(0);

    tier1_span * tariff.mileage_tier1_rate_cents
        + tier2_span * tariff.mileage_tier2_rate_cents
        + tier3_span * tariff.mileage_tier3_rate_cents
}

fn receipt_contribution(trip: &Trip, tariff: &Tariff) -> Cents {
    let rate_bp = tariff.receipt_band(trip.days()).rate_bp(trip.receipts());
    trip.receipts().mul_div(rate_bp, 10_000)
}
