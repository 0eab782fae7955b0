//! Turning add-to-cart controls into cart lines.
//!
//! An add control is described by its markup attributes, named without the
//! `data-` prefix:
//!
//! | Attribute | Meaning | Default |
//! |---|---|---|
//! | `sku` | line identity (required) | - |
//! | `name` | display label | `""` |
//! | `cases-per-case` | informational count | 0 |
//! | `price-normal` | base unit price | 0 |
//! | `price10`, then `price-10` | 10+ unit price | 0 |
//! | `price50`, then `price-50` | 50+ unit price | 0 |
//! | `quantity` | bulk-add count from a quantity selector | 1 |
//!
//! For the tier prices the first spelling that is present and non-empty is
//! used, even when its value does not parse.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{AddOutcome, CartLineItem, parse_leading_int, parse_quantity};
use crate::host::{CountDisplay, Notifier};
use crate::storage::KeyValueStorage;
use crate::store::{CartStore, StoreError};
use crate::types::{Price, Sku, SkuError};

/// Attribute names understood on an add control.
pub mod attr {
    pub const SKU: &str = "sku";
    pub const NAME: &str = "name";
    pub const CASES_PER_CASE: &str = "cases-per-case";
    pub const PRICE_NORMAL: &str = "price-normal";
    /// Accepted spellings of the 10+ price, in precedence order.
    pub const PRICE_10: [&str; 2] = ["price10", "price-10"];
    /// Accepted spellings of the 50+ price, in precedence order.
    pub const PRICE_50: [&str; 2] = ["price50", "price-50"];
    pub const QUANTITY: &str = "quantity";
}

/// Errors reading an add control.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("add control has no sku")]
    MissingSku,
}

impl From<SkuError> for CaptureError {
    fn from(_: SkuError) -> Self {
        Self::MissingSku
    }
}

/// Read access to a control's attributes.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl AttributeSource for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl AttributeSource for BTreeMap<String, String> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// An add-to-cart control as authored in catalog markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddControl {
    attributes: BTreeMap<String, String>,
}

impl AddControl {
    #[must_use]
    pub const fn new(attributes: BTreeMap<String, String>) -> Self {
        Self { attributes }
    }

    /// The control's attributes, sorted by name.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Whether the control carries a usable `sku`.
    #[must_use]
    pub fn has_sku(&self) -> bool {
        self.attribute(attr::SKU)
            .is_some_and(|sku| !sku.trim().is_empty())
    }

    /// Parse the catalog item this control adds.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::MissingSku`] if the control has no sku.
    pub fn catalog_item(&self) -> Result<CatalogItem, CaptureError> {
        CatalogItem::from_attributes(self)
    }
}

impl AttributeSource for AddControl {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.attribute(name)
    }
}

impl FromIterator<(String, String)> for AddControl {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// The add controls on a page, skipping any without a sku.
///
/// A page with no controls yields nothing; that is not an error.
pub fn discover<'a, I>(controls: I) -> impl Iterator<Item = &'a AddControl>
where
    I: IntoIterator<Item = &'a AddControl>,
{
    controls.into_iter().filter(|control| control.has_sku())
}

/// Identity and price metadata for one catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub sku: Sku,
    pub name: String,
    pub cases_per_case: u32,
    pub price_normal: Price,
    pub price10: Price,
    pub price50: Price,
}

impl CatalogItem {
    /// Read an item from control attributes.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::MissingSku`] if `sku` is absent or blank.
    pub fn from_attributes(source: &(impl AttributeSource + ?Sized)) -> Result<Self, CaptureError> {
        let sku = Sku::parse(source.attribute(attr::SKU).unwrap_or_default())?;

        Ok(Self {
            sku,
            name: source.attribute(attr::NAME).unwrap_or_default().to_owned(),
            cases_per_case: source
                .attribute(attr::CASES_PER_CASE)
                .and_then(parse_leading_int)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0),
            price_normal: source
                .attribute(attr::PRICE_NORMAL)
                .map_or(Price::ZERO, Price::parse_or_zero),
            price10: first_price(source, attr::PRICE_10),
            price50: first_price(source, attr::PRICE_50),
        })
    }

    /// A cart line for this item holding `quantity` cases.
    #[must_use]
    pub fn into_line(self, quantity: u32) -> CartLineItem {
        CartLineItem {
            sku: self.sku,
            name: self.name,
            cases_per_case: self.cases_per_case,
            price_normal: self.price_normal,
            price10: self.price10,
            price50: self.price50,
            quantity,
        }
    }
}

/// Price under the first present, non-empty spelling.
fn first_price(source: &(impl AttributeSource + ?Sized), spellings: [&str; 2]) -> Price {
    spellings
        .iter()
        .find_map(|name| source.attribute(name).filter(|value| !value.is_empty()))
        .map_or(Price::ZERO, Price::parse_or_zero)
}

/// The number of cases a control adds: its quantity selector's value when
/// that is a positive integer, otherwise 1.
#[must_use]
pub fn requested_quantity(source: &(impl AttributeSource + ?Sized)) -> u32 {
    source
        .attribute(attr::QUANTITY)
        .and_then(parse_quantity)
        .unwrap_or(1)
}

/// Result of activating an add control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedToCart {
    pub sku: Sku,
    pub name: String,
    /// Cases added by this activation.
    pub added: u32,
    /// The line's quantity afterwards.
    pub line_quantity: u32,
    pub outcome: AddOutcome,
}

impl AddedToCart {
    /// The notification shown to the visitor.
    #[must_use]
    pub fn message(&self) -> String {
        let label = if self.name.is_empty() {
            self.sku.as_str()
        } else {
            self.name.as_str()
        };
        format!("Added {} × {label} to cart.", self.added)
    }
}

/// Activate an add control: load, increment or append, save, notify.
///
/// # Errors
///
/// Returns [`StoreError`] if the updated cart cannot be saved.
pub async fn add_to_cart<S, D, N>(
    store: &CartStore<S>,
    item: CatalogItem,
    quantity: u32,
    display: &mut D,
    notifier: &mut N,
) -> Result<AddedToCart, StoreError>
where
    S: KeyValueStorage,
    D: CountDisplay + ?Sized,
    N: Notifier + ?Sized,
{
    let mut cart = store.load().await;
    let sku = item.sku.clone();
    let name = item.name.clone();

    let outcome = cart.add(item.into_line(quantity));
    let line_quantity = cart.get(outcome.index()).map_or(quantity, |line| line.quantity);

    store.save(&cart, display).await?;

    let added = AddedToCart {
        sku,
        name,
        added: quantity,
        line_quantity,
        outcome,
    };
    tracing::info!(
        sku = %added.sku,
        added = added.added,
        line_quantity = added.line_quantity,
        "Added to cart"
    );
    notifier.notify(&added.message());
    Ok(added)
}
