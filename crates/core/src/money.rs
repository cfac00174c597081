//! Monetary amounts in the smallest currency unit.
//!
//! Single-currency by design (multi-currency pricing is out of scope), so
//! the currency code is implicit and amounts are plain integer cents.

use core::iter::Sum;
use core::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

use crate::Quantity;

/// A non-negative monetary amount stored as integer cents.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Mul<Quantity> for Money {
    type Output = Money;

    /// Line subtotal: unit price times quantity.
    fn mul(self, rhs: Quantity) -> Money {
        Money(self.0 * u64::from(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl core::fmt::Display for Money {
    /// Renders as a decimal amount, e.g. `12.34`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_decimal() {
        assert_eq!(Money::from_cents(1000).to_string(), "10.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(12345).to_string(), "123.45");
    }

    #[test]
    fn subtotal_multiplies_by_quantity() {
        assert_eq!(Money::from_cents(250) * 4, Money::from_cents(1000));
        assert_eq!(Money::from_cents(250) * 0, Money::ZERO);
    }

    #[test]
    fn sums_over_iterators() {
        let total: Money = [100u64, 250, 5]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total, Money::from_cents(355));
    }

    #[test]
    fn serializes_transparently() {
        assert_eq!(serde_json::to_string(&Money::from_cents(999)).unwrap(), "999");
    }
}
