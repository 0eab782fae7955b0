//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog index
//! GET  /catalog/{slug}         - Catalog page with add controls
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove line (returns cart_items fragment)
//! POST /cart/clear             - Clear when confirmed (returns cart_items fragment)
//! POST /cart/copy              - Copy summary (client effects only)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Order
//! POST /order                  - Copy summary and open the external order form
//! ```

pub mod cart;
pub mod catalog;
pub mod order;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/copy", post(cart::copy))
        .route("/count", get(cart::count))
}

/// Create all storefront routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/catalog/{slug}", get(catalog::show))
        .nest("/cart", cart_routes())
        .route("/order", post(order::request))
}
