//! Volume tiers and unit price selection.
//!
//! The tier belongs to the whole cart, not to a line: it is chosen once from
//! the cart's total case count and then applied to every line.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLineItem};
use crate::types::Price;

/// Total case count at which the 10+ closeout tier starts.
pub const CLOSEOUT_10_THRESHOLD: u64 = 10;

/// Total case count at which the 50+ closeout tier starts.
pub const CLOSEOUT_50_THRESHOLD: u64 = 50;

/// A volume discount tier, ordered `Normal < Closeout10 < Closeout50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Normal,
    Closeout10,
    Closeout50,
}

impl Tier {
    /// All tiers in price-column order.
    pub const ALL: [Self; 3] = [Self::Normal, Self::Closeout10, Self::Closeout50];

    /// Tier for a total case count.
    #[must_use]
    pub const fn for_total_quantity(total: u64) -> Self {
        if total >= CLOSEOUT_50_THRESHOLD {
            Self::Closeout50
        } else if total >= CLOSEOUT_10_THRESHOLD {
            Self::Closeout10
        } else {
            Self::Normal
        }
    }

    /// Human-readable label used in the order summary.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Closeout10 => "Closeout 10+",
            Self::Closeout50 => "Closeout 50+",
        }
    }

    /// The price in this tier's own column of a line.
    #[must_use]
    pub const fn column_price(self, item: &CartLineItem) -> Price {
        match self {
            Self::Normal => item.price_normal,
            Self::Closeout10 => item.price10,
            Self::Closeout50 => item.price50,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The tier in effect for a cart.
#[must_use]
pub fn active_tier(cart: &Cart) -> Tier {
    Tier::for_total_quantity(cart.total_quantity())
}

/// The unit price a line is charged under `tier`.
///
/// Falls back straight to the normal price when the line does not offer the
/// active tier's price. A 50+ cart never uses a line's 10+ price.
#[must_use]
pub fn unit_price(item: &CartLineItem, tier: Tier) -> Price {
    match tier {
        Tier::Closeout50 if item.price50.is_offered() => item.price50,
        Tier::Closeout10 if item.price10.is_offered() => item.price10,
        _ => item.price_normal,
    }
}

/// Unit price times quantity.
#[must_use]
pub fn line_total(item: &CartLineItem, tier: Tier) -> Price {
    unit_price(item, tier).times(item.quantity)
}

/// Sum of all line totals under `tier`.
#[must_use]
pub fn grand_total(cart: &Cart, tier: Tier) -> Price {
    cart.lines().iter().map(|item| line_total(item, tier)).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Sku;

    fn item(normal: f64, p10: f64, p50: f64, quantity: u32) -> CartLineItem {
        CartLineItem {
            sku: Sku::parse("A").unwrap(),
            name: "Jar".to_string(),
            cases_per_case: 0,
            price_normal: Price::new(normal),
            price10: Price::new(p10),
            price50: Price::new(p50),
            quantity,
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::for_total_quantity(0), Tier::Normal);
        assert_eq!(Tier::for_total_quantity(9), Tier::Normal);
        assert_eq!(Tier::for_total_quantity(10), Tier::Closeout10);
        assert_eq!(Tier::for_total_quantity(49), Tier::Closeout10);
        assert_eq!(Tier::for_total_quantity(50), Tier::Closeout50);
        assert_eq!(Tier::for_total_quantity(u64::MAX), Tier::Closeout50);
    }

    #[test]
    fn test_tier_non_decreasing_in_quantity() {
        let mut previous = Tier::Normal;
        for total in 0..120 {
            let tier = Tier::for_total_quantity(total);
            assert!(tier >= previous, "tier dropped at {total}");
            previous = tier;
        }
    }

    #[test]
    fn test_active_tier_uses_whole_cart() {
        let mut b = item(5.0, 4.0, 0.0, 4);
        b.sku = Sku::parse("B").unwrap();
        let cart = Cart::from_lines([item(10.0, 8.0, 0.0, 6), b]);
        assert_eq!(active_tier(&cart), Tier::Closeout10);
    }

    #[test]
    fn test_unit_price_uses_tier_price_when_offered() {
        let line = item(10.0, 8.0, 6.0, 1);
        assert_eq!(unit_price(&line, Tier::Normal), Price::new(10.0));
        assert_eq!(unit_price(&line, Tier::Closeout10), Price::new(8.0));
        assert_eq!(unit_price(&line, Tier::Closeout50), Price::new(6.0));
    }

    #[test]
    fn test_unit_price_50_without_price50_skips_price10() {
        let line = item(10.0, 8.0, 0.0, 1);
        assert_eq!(unit_price(&line, Tier::Closeout50), Price::new(10.0));
    }

    #[test]
    fn test_unit_price_10_without_price10_uses_normal() {
        let line = item(10.0, 0.0, 6.0, 1);
        assert_eq!(unit_price(&line, Tier::Closeout10), Price::new(10.0));
    }

    #[test]
    fn test_totals() {
        let line = item(10.0, 8.0, 0.0, 12);
        let cart = Cart::from_lines([line.clone()]);
        let tier = active_tier(&cart);
        assert_eq!(tier, Tier::Closeout10);
        assert_eq!(line_total(&line, tier).to_string(), "$96.00");
        assert_eq!(grand_total(&cart, tier).to_string(), "$96.00");
        assert_eq!(grand_total(&Cart::new(), Tier::Normal), Price::ZERO);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Tier::Normal.label(), "Normal");
        assert_eq!(Tier::Closeout10.to_string(), "Closeout 10+");
        assert_eq!(Tier::Closeout50.to_string(), "Closeout 50+");
    }
}
