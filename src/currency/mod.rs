//! Currency-safe amounts held in integer cents.

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::errors::BudgetError;

const CENTS_PER_UNIT: i64 = 100;

/// Default symbol used when rendering amounts.
pub const DEFAULT_SYMBOL: &str = "$";

/// A monetary amount stored as whole cents.
///
/// Arithmetic never goes through floating point, so summing many expenses
/// cannot drift. Negative values only appear in derived figures such as a
/// balance; recorded expenses and budgets are validated to be non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest amount a single expense or budget may hold ($10,000,000,000.00).
    ///
    /// Stays well inside the range where `f64` represents every cent exactly,
    /// and millions of such values still sum without reaching `i64::MAX`.
    pub const MAX: Money = Money(1_000_000_000_000);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Converts a floating point value, rounding to the nearest cent.
    ///
    /// Returns `None` for NaN, infinities and values that do not fit in cents.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * CENTS_PER_UNIT as f64).round();
        if cents.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Parses a user-supplied amount and rejects anything negative.
    ///
    /// Accepts an optional leading `$` and surrounding whitespace; more than two
    /// fractional digits are rounded to the nearest cent.
    pub fn parse_non_negative(input: &str) -> Result<Self, BudgetError> {
        let amount: Money = input.parse()?;
        amount.ensure_recordable()
    }

    /// Accepts amounts between zero and [`Money::MAX`] inclusive.
    pub fn ensure_recordable(self) -> Result<Self, BudgetError> {
        if self.is_negative() {
            return Err(BudgetError::InvalidAmount(format!(
                "amount must not be negative (got {self})"
            )));
        }
        if self > Money::MAX {
            return Err(BudgetError::InvalidAmount(format!(
                "amount must not exceed {} (got {self})",
                Money::MAX
            )));
        }
        Ok(self)
    }

    /// Renders the amount with `symbol` and two decimals, e.g. `$1234.50` or `-$3.00`.
    pub fn display_with(self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        format!(
            "{sign}{symbol}{}.{:02}",
            cents / CENTS_PER_UNIT as u64,
            cents % CENTS_PER_UNIT as u64
        )
    }

    /// Share of `self` within `total` as a percentage rounded to one decimal.
    ///
    /// Defined as `0.0` when `total` is zero.
    pub fn percentage_of(self, total: Money) -> f64 {
        if total.is_zero() {
            return 0.0;
        }
        let raw = self.0 as f64 / total.0 as f64 * 100.0;
        (raw * 10.0).round() / 10.0
    }
}

impl FromStr for Money {
    type Err = BudgetError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };
        let digits = unsigned.strip_prefix(DEFAULT_SYMBOL).unwrap_or(unsigned);
        let well_formed = !digits.is_empty()
            && digits.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
            && digits.chars().filter(|ch| *ch == '.').count() <= 1
            && digits.chars().any(|ch| ch.is_ascii_digit());
        if !well_formed {
            return Err(BudgetError::InvalidAmount(format!(
                "`{}` is not a number",
                input.trim()
            )));
        }
        let value: f64 = digits
            .parse()
            .map_err(|_| BudgetError::InvalidAmount(format!("`{}` is not a number", trimmed)))?;
        let amount = Money::from_f64(value)
            .ok_or_else(|| BudgetError::InvalidAmount(format!("`{}` is out of range", trimmed)))?;
        Ok(if negative { Money(amount.0.saturating_neg()) } else { amount })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with(DEFAULT_SYMBOL))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

// Persisted as a plain JSON number (`50.0`) so stored snapshots stay readable.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_f64(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid amount {value}")))
    }
}
