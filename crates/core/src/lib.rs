//! Closeout Core - cart, pricing and order handoff.
//!
//! This crate holds everything about the closeout cart that does not depend
//! on a particular host (browser, HTTP server, CLI):
//!
//! - [`cart`] - Line items and the SKU-unique cart
//! - [`pricing`] - Volume tiers and unit price selection
//! - [`storage`] - The key-value storage seam and an in-memory backend
//! - [`store`] - Loading and saving the cart under its storage key
//! - [`capture`] - Turning add-to-cart control attributes into cart lines
//! - [`view`] - The cart page render model and its edit actions
//! - [`order`] - Summary copy and the external order form handoff
//! - [`host`] - Traits for host-side effects (badges, toasts, clipboard)
//!
//! # Architecture
//!
//! No HTTP, no templates. Every operation that touches persisted state takes
//! a [`store::CartStore`] and follows load-mutate-store: it re-reads the full
//! cart, mutates the in-memory copy and writes the full cart back.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod capture;
pub mod cart;
pub mod host;
pub mod order;
pub mod pricing;
pub mod storage;
pub mod store;
pub mod types;
pub mod view;

pub use cart::{AddOutcome, Cart, CartLineItem};
pub use pricing::Tier;
pub use store::CartStore;
pub use types::*;
