//! Cart line items and the SKU-unique cart.
//!
//! The persisted shape is a bare JSON array of line items with camelCase
//! field names:
//!
//! ```json
//! [{"sku":"CL-1001","name":"Glass Jars","casesPerCase":12,
//!   "priceNormal":24.0,"price10":21.5,"price50":19.0,"quantity":3}]
//! ```
//!
//! Every field but `sku` is optional on read and falls back to its default.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{Price, Sku};

/// One cart row, keyed by SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub sku: Sku,
    #[serde(default)]
    pub name: String,
    /// Informational only; never used in pricing.
    #[serde(default)]
    pub cases_per_case: u32,
    #[serde(default)]
    pub price_normal: Price,
    #[serde(default)]
    pub price10: Price,
    #[serde(default)]
    pub price50: Price,
    #[serde(default)]
    pub quantity: u32,
}

/// What [`Cart::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// An existing line was incremented; `quantity` is its new total.
    Incremented { index: usize, quantity: u32 },
    /// A new line was appended at `index`.
    Inserted { index: usize },
}

impl AddOutcome {
    /// Index of the line that received the cases.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Incremented { index, .. } | Self::Inserted { index } => index,
        }
    }
}

/// An ordered sequence of line items, unique by SKU.
///
/// Persisted as a bare JSON array. Repeated SKUs in stored data are merged
/// on deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartLineItem>::deserialize(deserializer).map(Self::from_lines)
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from lines, merging any repeated SKU into its first
    /// occurrence. Lines holding zero cases are dropped.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Self::new();
        for line in lines.into_iter().filter(|line| line.quantity > 0) {
            cart.add(line);
        }
        cart
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CartLineItem> {
        self.lines.get(index)
    }

    /// Find the line for a SKU.
    #[must_use]
    pub fn find(&self, sku: &Sku) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| &line.sku == sku)
    }

    /// Total number of cases across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Add a line, or increment the existing line with the same SKU by
    /// `line.quantity`.
    ///
    /// An existing line keeps its stored name and prices.
    pub fn add(&mut self, line: CartLineItem) -> AddOutcome {
        if let Some((index, existing)) = self
            .lines
            .iter_mut()
            .enumerate()
            .find(|(_, existing)| existing.sku == line.sku)
        {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
            return AddOutcome::Incremented {
                index,
                quantity: existing.quantity,
            };
        }

        self.lines.push(line);
        AddOutcome::Inserted {
            index: self.lines.len() - 1,
        }
    }

    /// Set the quantity of the line at `index`.
    ///
    /// `None` or zero removes the line. Returns `false` if `index` is out of
    /// range, leaving the cart untouched.
    pub fn set_quantity(&mut self, index: usize, quantity: Option<u32>) -> bool {
        match quantity.filter(|&q| q > 0) {
            Some(quantity) => match self.lines.get_mut(index) {
                Some(line) => {
                    line.quantity = quantity;
                    true
                }
                None => false,
            },
            None => self.remove(index).is_some(),
        }
    }

    /// Remove and return the line at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<CartLineItem> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Parse user-typed whole numbers the lenient way form inputs need:
/// optional leading whitespace and sign, then at least one digit, ignoring
/// anything after the digits (`"3.7"` is 3, `"12 cases"` is 12).
///
/// Returns `None` when no digits lead the input.
#[must_use]
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, s.get(1..)?),
        Some(b'+') => (false, s.get(1..)?),
        _ => (false, s),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = rest.get(..digits_end)?;
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse a quantity input: a positive integer or nothing.
///
/// Values above `u32::MAX` saturate.
#[must_use]
pub fn parse_quantity(raw: &str) -> Option<u32> {
    parse_leading_int(raw)
        .filter(|&n| n > 0)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn line(sku: &str, quantity: u32) -> CartLineItem {
        CartLineItem {
            sku: Sku::parse(sku).unwrap(),
            name: format!("Item {sku}"),
            cases_per_case: 6,
            price_normal: Price::new(10.0),
            price10: Price::ZERO,
            price50: Price::ZERO,
            quantity,
        }
    }

    #[test]
    fn test_add_new_sku_appends() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(line("A", 3)), AddOutcome::Inserted { index: 0 });
        assert_eq!(cart.add(line("B", 1)), AddOutcome::Inserted { index: 1 });
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_quantity(), 4);
    }

    #[test]
    fn test_add_existing_sku_increments() {
        let mut cart = Cart::new();
        cart.add(line("A", 7));
        let mut again = line("A", 5);
        again.name = "Renamed".to_string();

        let outcome = cart.add(again);

        assert_eq!(
            outcome,
            AddOutcome::Incremented {
                index: 0,
                quantity: 12
            }
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].name, "Item A");
    }

    #[test]
    fn test_add_saturates() {
        let mut cart = Cart::new();
        cart.add(line("A", u32::MAX));
        cart.add(line("A", 1));
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_from_lines_merges_duplicates() {
        let cart = Cart::from_lines([line("A", 1), line("B", 2), line("A", 4)]);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.find(&Sku::parse("A").unwrap()).unwrap().quantity, 5);
    }

    #[test]
    fn test_set_quantity_updates_line() {
        let mut cart = Cart::from_lines([line("A", 1), line("B", 2)]);
        assert!(cart.set_quantity(1, Some(9)));
        assert_eq!(cart.lines()[1].quantity, 9);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_set_quantity_zero_or_none_removes_exactly_one_line() {
        let mut cart = Cart::from_lines([line("A", 1), line("B", 2), line("C", 3)]);
        assert!(cart.set_quantity(1, Some(0)));
        assert_eq!(cart.len(), 2);
        assert!(cart.set_quantity(0, None));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].sku.as_str(), "C");
    }

    #[test]
    fn test_set_quantity_out_of_range_is_noop() {
        let mut cart = Cart::from_lines([line("A", 1)]);
        assert!(!cart.set_quantity(4, Some(2)));
        assert!(!cart.set_quantity(4, None));
        assert_eq!(cart, Cart::from_lines([line("A", 1)]));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::from_lines([line("A", 1), line("B", 2)]);
        assert_eq!(cart.remove(0).unwrap().sku.as_str(), "A");
        assert!(cart.remove(5).is_none());
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int("  3.7"), Some(3));
        assert_eq!(parse_leading_int("12 cases"), Some(12));
        assert_eq!(parse_leading_int("-4"), Some(-4));
        assert_eq!(parse_leading_int("+4"), Some(4));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("5"), Some(5));
        assert_eq!(parse_quantity("0"), None);
        assert_eq!(parse_quantity("-2"), None);
        assert_eq!(parse_quantity("   "), None);
        assert_eq!(parse_quantity("x1"), None);
        assert_eq!(parse_quantity("99999999999"), Some(u32::MAX));
    }

    #[test]
    fn test_deserialize_defaults_missing_fields() {
        let cart: Cart = serde_json::from_str(r#"[{"sku":"A","quantity":2}]"#).unwrap();
        let only = &cart.lines()[0];
        assert_eq!(only.name, "");
        assert_eq!(only.cases_per_case, 0);
        assert_eq!(only.price_normal, Price::ZERO);
        assert_eq!(only.quantity, 2);
    }

    #[test]
    fn test_deserialize_merges_repeated_skus() {
        let cart: Cart = serde_json::from_str(
            r#"[{"sku":"A","quantity":2},{"sku":"B","quantity":1},{"sku":"A","quantity":3}]"#,
        )
        .unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_deserialize_drops_lines_without_quantity() {
        let cart: Cart =
            serde_json::from_str(r#"[{"sku":"A"},{"sku":"B","quantity":0},{"sku":"C","quantity":1}]"#)
                .unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].sku.as_str(), "C");
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_deserialize_clamps_stored_prices() {
        let cart: Cart = serde_json::from_str(
            r#"[{"sku":"A","quantity":1,"priceNormal":-5.0,"price10":2.5}]"#,
        )
        .unwrap();
        assert_eq!(cart.lines()[0].price_normal, Price::ZERO);
        assert_eq!(cart.lines()[0].price10, Price::new(2.5));
    }

    #[test]
    fn test_serialize_camel_case_fields() {
        let json = serde_json::to_string(&Cart::from_lines([line("A", 1)])).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"casesPerCase\":6"));
        assert!(json.contains("\"priceNormal\":10.0"));
        assert!(json.contains("\"price10\":0.0"));
    }
}
