//! Naira amounts held in kobo.
//!
//! The payment gateway works in minor units while clients and admins quote
//! prices in naira. `Money` keeps the integer minor amount and converts to
//! naira only at the JSON boundary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use super::ValidationError;

/// Minor units per major unit (kobo per naira).
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Non-negative amount of money in kobo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates an amount from minor units.
    pub fn from_minor(kobo: i64) -> Result<Self, ValidationError> {
        if kobo < 0 {
            return Err(ValidationError::too_small("amount", 0, kobo));
        }
        Ok(Self(kobo))
    }

    /// Creates an amount from a naira figure, rounding to the nearest kobo.
    pub fn from_major(naira: f64) -> Result<Self, ValidationError> {
        if !naira.is_finite() {
            return Err(ValidationError::invalid_format("amount", "must be a finite number"));
        }
        let kobo = (naira * MINOR_UNITS_PER_MAJOR as f64).round();
        if kobo < 0.0 {
            return Err(ValidationError::invalid_format("amount", "cannot be negative"));
        }
        if kobo > i64::MAX as f64 {
            return Err(ValidationError::invalid_format("amount", "is too large"));
        }
        Ok(Self(kobo as i64))
    }

    /// Amount in kobo.
    pub fn minor(&self) -> i64 {
        self.0
    }

    /// Amount in naira.
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / MINOR_UNITS_PER_MAJOR as f64
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Line total for `quantity` units at this price.
    pub fn times(&self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(quantity)))
    }

    /// Formats with thousands separators, e.g. `35,000` or `1,250.50`.
    pub fn display_major(&self) -> String {
        let naira = self.0 / MINOR_UNITS_PER_MAJOR;
        let kobo = self.0 % MINOR_UNITS_PER_MAJOR;

        let digits = naira.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if kobo == 0 {
            grouped
        } else {
            format!("{}.{:02}", grouped, kobo)
        }
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₦{}", self.display_major())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let naira = f64::deserialize(deserializer)?;
        Money::from_major(naira).map_err(serde::de::Error::custom)
    }
}
