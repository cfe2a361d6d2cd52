use crate::money::{Cents, parse_fixed};

/// One reimbursement request, already validated into exact integer units.
///
/// Constructed fresh per evaluation and never mutated. Miles are held as
/// milli-miles and receipts as cents so the engine sees no floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trip {
    days: u32,
    miles_milli: i64,
    receipts: Cents,
}

impl Trip {
    /// Builds a trip from pre-parsed units. `days` must be positive and
    /// `miles_milli` non-negative; out-of-domain values are rejected here,
    /// at the boundary, so the engine can assume a legal input.
    pub fn new(days: u32, miles_milli: i64, receipts: Cents) -> Result<Self, String> {
        if days == 0 {
            return Err("trip duration must be at least 1 day".to_string());
        }
        if miles_milli < 0 {
            return Err("miles traveled must be non-negative".to_string());
        }
        if receipts < Cents::ZERO {
            return Err("receipt total must be non-negative".to_string());
        }
        Ok(Trip {
            days,
            miles_milli,
            receipts,
        })
    }

    /// Parses the three raw argument strings: a positive integer day
    /// count, a non-negative mile count with at most 3 decimal places,
    /// and a non-negative dollar amount with at most 2 decimal places.
    pub fn parse(days: &str, miles: &str, receipts: &str) -> Result<Self, String> {
        let days_value = parse_days(days)?;
        let miles_milli = parse_fixed(miles, 3)
            .map_err(|reason| format!("invalid miles traveled: {reason}"))?;
        let receipt_cents = parse_fixed(receipts, 2)
            .map_err(|reason| format!("invalid receipt total: {reason}"))?;
        Trip::new(days_value, miles_milli, Cents::new(receipt_cents))
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn miles_milli(&self) -> i64 {
        self.miles_milli
    }

    pub fn receipts(&self) -> Cents {
        self.receipts
    }

    /// Day count used in per-day ratios. `Trip::new` rejects zero days,
    /// but the legacy convention for a zero denominator is to use the
    /// numerator unchanged, which is what a one-day divisor does.
    pub fn ratio_days(&self) -> i64 {
        i64::from(self.days.max(1))
    }
}

fn parse_days(value: &str) -> Result<u32, String> {
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err("invalid trip duration: days must be a positive integer".to_string());
    }
    let parsed = value
        .parse::<u32>()
        .map_err(|_| "invalid trip duration: days is out of range".to_string())?;
    if parsed == 0 {
        return Err("invalid trip duration: days must be at least 1".to_string());
    }
    Ok(parsed)
}
