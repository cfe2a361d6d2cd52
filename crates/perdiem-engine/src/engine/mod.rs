mod adjust;
mod base;

pub use adjust::AdjustmentTrace;

use crate::money::Cents;
use crate::tariff::{Tariff, TripLengthClass};
use crate::trip::Trip;

/// Final component amounts after the adjustment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakdown {
    pub per_diem: Cents,
    pub mileage: Cents,
    pub receipts: Cents,
}

/// One engine evaluation: the rounded total plus enough detail to audit
/// how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub total: Cents,
    pub breakdown: Breakdown,
    pub trace: AdjustmentTrace,
    pub trip_length_class: TripLengthClass,
}

/// Evaluates one trip against the tariff.
///
/// Pure and total: identical inputs always produce the identical cent
/// amount, every legal trip reaches exactly one result, and concurrent
/// calls share nothing mutable. All arithmetic is integer cents (or exact
/// milli-cents) with half-to-even rounding at component boundaries.
pub fn compute(trip: &Trip, tariff: &Tariff) -> Evaluation {
    let adjusted = adjust::apply(trip, tariff, base::estimate(trip, tariff));
    let total = (adjusted.per_diem + adjusted.mileage + adjusted.receipts).max_zero();
    Evaluation {
        total,
        breakdown: Breakdown {
            per_diem: adjusted.per_diem,
            mileage: adjusted.mileage,
            receipts: adjusted.receipts,
        },
        trace: adjusted.trace,
        trip_length_class: tariff.trip_length_class(trip.days()),
    }
}

/// Shorthand when only the reimbursable amount is needed.
pub fn compute_amount(trip: &Trip, tariff: &Tariff) -> Cents {
    compute(trip, tariff).total
}
