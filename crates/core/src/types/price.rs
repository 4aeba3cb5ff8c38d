//! Type-safe price representation using decimal arithmetic.
//!
//! The hosted backend stores prices as plain JSON numbers, so the serde
//! representation goes through `f64`. All arithmetic on this side is exact
//! decimal: line totals and order totals never accumulate float error.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// A price in the store's currency (BRL).
///
/// Wraps a `Decimal` amount. Display renders the conventional `R$ 9.99`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a float amount.
    ///
    /// Returns `None` if the value is not representable (NaN, infinity).
    #[must_use]
    pub fn from_f64(amount: f64) -> Option<Self> {
        Decimal::from_f64(amount).map(Self)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f64() {
        let price = Price::from_f64(19.9).unwrap();
        assert_eq!(format!("{price}"), "R$ 19.90");

        assert!(Price::from_f64(f64::NAN).is_none());
        assert!(Price::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_times() {
        let price = Price::new(Decimal::new(1050, 2)); // 10.50
        assert_eq!(price.times(3), Price::new(Decimal::new(3150, 2)));
        assert_eq!(price.times(0), Price::ZERO);
    }

    #[test]
    fn test_sum() {
        let total: Price = [
            Price::new(Decimal::new(2000, 2)),
            Price::new(Decimal::new(500, 2)),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, Price::new(Decimal::new(2500, 2)));
    }

    #[test]
    fn test_serde_as_float() {
        let price = Price::new(Decimal::new(2590, 2));
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "25.9");

        let parsed: Price = serde_json::from_str("25.9").unwrap();
        assert_eq!(parsed, price);
    }

    #[test]
    fn test_display_zero() {
        assert_eq!(format!("{}", Price::ZERO), "R$ 0.00");
    }
}
