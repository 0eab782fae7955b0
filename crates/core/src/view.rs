//! The cart page: render model and edit actions.
//!
//! [`render`] turns a cart into everything the page shows: table rows with
//! the three tier prices, the grand total and the plain-text order summary.
//! The edit actions each follow load-mutate-store and hand back a fresh
//! render so the page always reflects what was persisted.

use crate::cart::{Cart, CartLineItem, parse_quantity};
use crate::host::{Confirm, CountDisplay};
use crate::pricing::{self, Tier};
use crate::storage::KeyValueStorage;
use crate::store::{CartStore, StoreError};
use crate::types::Price;

/// Prompt shown before clearing the cart.
pub const CLEAR_PROMPT: &str = "Clear all items from your cart?";

/// One tier price column of a row.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCell {
    pub tier: Tier,
    /// `$x.xx`, or empty when the line does not offer this tier.
    pub text: String,
    /// The cart's tier is this column's tier and the line offers it.
    pub active: bool,
}

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct CartRow {
    /// Position in the cart, used by the edit and remove controls.
    pub index: usize,
    pub name: String,
    pub sku: String,
    /// Empty when the item has no cases-per-case figure.
    pub cases_per_case: String,
    pub quantity: u32,
    pub prices: Vec<PriceCell>,
    pub unit_price: Price,
    pub line_total: Price,
}

/// Everything the cart page displays.
#[derive(Debug, Clone, PartialEq)]
pub struct CartRender {
    pub tier: Tier,
    pub total_quantity: u64,
    pub rows: Vec<CartRow>,
    /// One line per cart entry, newline separated; empty for an empty cart.
    pub summary: String,
    pub grand_total: Price,
}

impl CartRender {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `Grand Total: $x.xx`.
    #[must_use]
    pub fn grand_total_text(&self) -> String {
        format!("Grand Total: {}", self.grand_total)
    }
}

/// Render a cart.
#[must_use]
pub fn render(cart: &Cart) -> CartRender {
    let tier = pricing::active_tier(cart);
    let rows: Vec<CartRow> = cart
        .lines()
        .iter()
        .enumerate()
        .map(|(index, item)| render_row(index, item, tier))
        .collect();

    let summary = rows
        .iter()
        .map(|row| summary_line(&row.sku, row.quantity, row.unit_price, tier))
        .collect::<Vec<_>>()
        .join("\n");
    let grand_total = rows.iter().map(|row| row.line_total).sum();

    CartRender {
        tier,
        total_quantity: cart.total_quantity(),
        rows,
        summary,
        grand_total,
    }
}

fn render_row(index: usize, item: &CartLineItem, tier: Tier) -> CartRow {
    let prices = Tier::ALL
        .into_iter()
        .map(|column| {
            let price = column.column_price(item);
            PriceCell {
                tier: column,
                text: if price.is_offered() {
                    price.to_string()
                } else {
                    String::new()
                },
                active: column == tier && price.is_offered(),
            }
        })
        .collect();

    let unit_price = pricing::unit_price(item, tier);
    CartRow {
        index,
        name: item.name.clone(),
        sku: item.sku.to_string(),
        cases_per_case: if item.cases_per_case == 0 {
            String::new()
        } else {
            item.cases_per_case.to_string()
        },
        quantity: item.quantity,
        prices,
        unit_price,
        line_total: unit_price.times(item.quantity),
    }
}

/// `"<sku>: <quantity> case(s) @ $<unit price> (<tier label>)"`.
#[must_use]
pub fn summary_line(sku: &str, quantity: u32, unit_price: Price, tier: Tier) -> String {
    format!("{sku}: {quantity} case(s) @ {unit_price} ({})", tier.label())
}

/// Apply a quantity edit to the line at `index`.
///
/// A positive integer sets the quantity; blank, zero, negative or
/// non-numeric input removes the line.
///
/// # Errors
///
/// Returns [`StoreError`] if the cart cannot be saved.
pub async fn edit_quantity<S, D>(
    store: &CartStore<S>,
    index: usize,
    raw: &str,
    display: &mut D,
) -> Result<CartRender, StoreError>
where
    S: KeyValueStorage,
    D: CountDisplay + ?Sized,
{
    let mut cart = store.load().await;
    let quantity = parse_quantity(raw);
    if cart.set_quantity(index, quantity) {
        tracing::debug!(index, ?quantity, "Cart quantity edited");
    } else {
        tracing::debug!(index, lines = cart.len(), "Quantity edit for missing line");
    }
    store.save(&cart, display).await?;
    Ok(render(&cart))
}

/// Remove the line at `index`.
///
/// # Errors
///
/// Returns [`StoreError`] if the cart cannot be saved.
pub async fn remove_line<S, D>(
    store: &CartStore<S>,
    index: usize,
    display: &mut D,
) -> Result<CartRender, StoreError>
where
    S: KeyValueStorage,
    D: CountDisplay + ?Sized,
{
    let mut cart = store.load().await;
    if let Some(removed) = cart.remove(index) {
        tracing::debug!(index, sku = %removed.sku, "Cart line removed");
    }
    store.save(&cart, display).await?;
    Ok(render(&cart))
}

/// Empty the cart once the user confirms.
///
/// Without confirmation nothing is written and the current cart is
/// rendered.
///
/// # Errors
///
/// Returns [`StoreError`] if the empty cart cannot be saved.
pub async fn clear<S, C, D>(
    store: &CartStore<S>,
    confirm: &mut C,
    display: &mut D,
) -> Result<CartRender, StoreError>
where
    S: KeyValueStorage,
    C: Confirm + ?Sized,
    D: CountDisplay + ?Sized,
{
    if !confirm.confirm(CLEAR_PROMPT) {
        return Ok(render(&store.load().await));
    }

    let cart = Cart::new();
    store.save(&cart, display).await?;
    tracing::info!("Cart cleared");
    Ok(render(&cart))
}
