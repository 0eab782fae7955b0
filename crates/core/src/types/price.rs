//! Unit prices and money totals.
//!
//! Amounts are plain `f64` dollars. Arithmetic never rounds; rounding to
//! cents happens only in [`Price`]'s `Display` implementation, which matches
//! how totals are shown to visitors (`$12.50`).

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

/// A dollar amount.
///
/// A price of zero on a tier column means the tier is not offered for that
/// item.
///
/// Deserialized amounts go through [`Price::new`], so stored negative or
/// non-finite values load as zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Price(f64);

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        Self::new(amount)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self(0.0);

    /// Create a price, clamping negative and non-finite amounts to zero.
    #[must_use]
    pub fn new(amount: f64) -> Self {
        if amount.is_finite() && amount > 0.0 {
            Self(amount)
        } else {
            Self::ZERO
        }
    }

    /// Parse a price from user-authored text, defaulting to zero.
    ///
    /// Blank, non-numeric, negative and non-finite input all give
    /// [`Price::ZERO`].
    #[must_use]
    pub fn parse_or_zero(s: &str) -> Self {
        s.trim().parse::<f64>().map_or(Self::ZERO, Self::new)
    }

    /// The raw amount in dollars.
    #[must_use]
    pub const fn amount(self) -> f64 {
        self.0
    }

    /// Whether this price is offered (strictly positive).
    #[must_use]
    pub fn is_offered(self) -> bool {
        self.0 > 0.0
    }

    /// Multiply by a case count without rounding.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * f64::from(quantity))
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
        write!(f, "${:.2}", self.0)
    }
}
