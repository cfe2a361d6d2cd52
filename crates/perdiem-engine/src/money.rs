use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Fixed-point dollar amount held as whole cents.
///
/// All engine arithmetic happens on this type (or on exact milli-cent
/// intermediates that collapse into it), so no binary floating point ever
/// feeds a threshold comparison or a rounding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cents(i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    pub const fn new(cents: i64) -> Self {
        Cents(cents)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Terminal two digits of the amount, as printed with two decimals.
    pub const fn fractional_cents(self) -> i64 {
        (self.0 % 100).abs()
    }

    pub fn max_zero(self) -> Self {
        Cents(self.0.max(0))
    }

    pub fn abs_diff(self, other: Cents) -> Cents {
        Cents((self.0 - other.0).abs())
    }

    /// `self × numerator / denominator`, rounded half-to-even.
    ///
    /// The committed rounding mode for every rate application in the
    /// engine. Intermediate product is widened to i128 so rate math on
    /// large receipt totals cannot overflow.
    pub fn mul_div(self, numerator: i64, denominator: i64) -> Self {
        Cents(mul_div_half_even(self.0, numerator, denominator))
    }
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0 + rhs.0)
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Cents) {
        self.0 += rhs.0;
    }
}

impl Sub for Cents {
    type Output = Cents;

    fn sub(self, rhs: Cents) -> Cents {
        Cents(self.0 - rhs.0)
    }
}

impl SubAssign for Cents {
    fn sub_assign(&mut self, rhs: Cents) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(formatter, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

/// `value × numerator / denominator` with half-to-even rounding.
///
/// `denominator` must be positive; callers pass fixed tariff scales
/// (100, 1000, 10000), never user input.
pub(crate) fn mul_div_half_even(value: i64, numerator: i64, denominator: i64) -> i64 {
    debug_assert!(denominator > 0);
    let product = i128::from(value) * i128::from(numerator);
    let negative = product < 0;
    let magnitude = product.unsigned_abs();
    let divisor = denominator as u128;
    let quotient = magnitude / divisor;
    let remainder = magnitude % divisor;
    let doubled = remainder * 2;
    let rounded = if doubled > divisor || (doubled == divisor && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    let signed = rounded as i128;
    i64::try_from(if negative { -signed } else { signed }).unwrap_or(i64::MAX)
}

/// Parses a non-negative decimal string into integer units at the given
/// scale (`fraction_digits = 2` → cents, `3` → milli-units).
///
/// Strict by design: no sign, no exponent, no grouping, and no more
/// fractional digits than the scale allows. Validation mirrors the
/// byte-level checks used for CLI argument parsing so every rejection has
/// a predictable message.
pub(crate) fn parse_fixed(value: &str, fraction_digits: u32) -> Result<i64, String> {
    let (integer_part, fraction_part) = match value.split_once('.') {
        Some((integer_part, fraction_part)) => (integer_part, fraction_part),
        None => (value, ""),
    };

    if integer_part.is_empty() || integer_part.len() > 13 {
        return Err("amount must start with 1-13 digits".to_string());
    }
    if !integer_part.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err("amount must be a plain non-negative decimal number".to_string());
    }
    if fraction_part.len() > fraction_digits as usize {
        return Err(format!(
            "amount must have at most {fraction_digits} decimal places"
        ));
    }
    if !fraction_part.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err("amount must be a plain non-negative decimal number".to_string());
    }

    let scale = 10i64.pow(fraction_digits);
    let whole = integer_part
        .parse::<i64>()
        .map_err(|_| "amount is out of range".to_string())?;

    let mut fraction = 0i64;
    if !fraction_part.is_empty() {
        fraction = fraction_part
            .parse::<i64>()
            .map_err(|_| "amount is out of range".to_string())?;
        fraction *= 10i64.pow(fraction_digits - fraction_part.len() as u32);
    }

    whole
        .checked_mul(scale)
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(|| "amount is out of range".to_string())
}

/// Formats integer units at the given scale back into a plain decimal
/// string, the inverse of [`parse_fixed`].
pub(crate) fn format_fixed(value: i64, fraction_digits: u32) -> String {
    let scale = 10i64.pow(fraction_digits);
    let magnitude = value.unsigned_abs();
    let sign = if value < 0 { "-" } else { "" };
    format!(
        "{sign}{}.{:0width$}",
        magnitude / scale as u64,
        magnitude % scale as u64,
        width = fraction_digits as usize
    )
}

/// Parses a non-negative dollar string (at most 2 decimal places) into cents.
pub fn parse_dollars(value: &str) -> Result<Cents, String> {
    parse_fixed(value, 2).map(Cents)
}
