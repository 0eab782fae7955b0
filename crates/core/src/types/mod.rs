//! Core value types for the closeout cart.
//!
//! This module provides type-safe wrappers for SKUs and prices.

pub mod price;
pub mod sku;

pub use price::Price;
pub use sku::{Sku, SkuError};
