//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself is JSON in the visitor's session; every handler reads it
//! fresh, mutates, writes it back and answers with the re-rendered fragment
//! plus client effects.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, http::StatusCode, response::IntoResponse};
use closeout_core::capture::{self, CatalogItem};
use closeout_core::host::Answered;
use closeout_core::view::{self, CLEAR_PROMPT, CartRender};
use closeout_core::{CartStore, order};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::effects::ClientEffects;
use crate::error::Result;
use crate::models::SessionStorage;
use crate::state::AppState;

/// The visitor's cart store.
pub(crate) fn cart_store(session: Session) -> CartStore<SessionStorage> {
    CartStore::new(SessionStorage::new(session))
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub index: usize,
    /// Raw input text; anything that is not a positive integer removes the line.
    #[serde(default)]
    pub quantity: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub index: usize,
}

/// Clear cart form data. `confirmed` is only sent once the visitor agreed.
#[derive(Debug, Deserialize)]
pub struct ClearCartForm {
    pub confirmed: Option<String>,
}

/// Copy summary form data.
#[derive(Debug, Deserialize)]
pub struct CopySummaryForm {
    #[serde(default)]
    pub summary: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartRender,
    pub clear_prompt: &'static str,
    pub order_form_url: String,
}

/// Cart contents fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartRender,
    pub clear_prompt: &'static str,
}

impl CartItemsTemplate {
    fn new(cart: CartRender) -> Self {
        Self {
            cart,
            clear_prompt: CLEAR_PROMPT,
        }
    }
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> CartShowTemplate {
    let cart = cart_store(session).load().await;

    CartShowTemplate {
        cart: view::render(&cart),
        clear_prompt: CLEAR_PROMPT,
        order_form_url: state.config().order_form_url.to_string(),
    }
}

/// Add item to cart (HTMX).
///
/// The form carries the add control's attributes. Returns the new count
/// badge along with a `cart-updated` event and a toast.
#[instrument(skip(session, form))]
pub async fn add(
    session: Session,
    Form(form): Form<HashMap<String, String>>,
) -> Result<impl IntoResponse> {
    let item = CatalogItem::from_attributes(&form)?;
    let quantity = capture::requested_quantity(&form);
    let store = cart_store(session);

    let mut effects = ClientEffects::new();
    let mut toast = ClientEffects::new();
    capture::add_to_cart(&store, item, quantity, &mut effects, &mut toast).await?;
    effects.merge(toast);

    let count = store.load().await.total_quantity();
    Ok((effects, CartCountTemplate { count }))
}

/// Update cart line quantity (HTMX).
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<impl IntoResponse> {
    let mut effects = ClientEffects::new();
    let cart = view::edit_quantity(&cart_store(session), form.index, &form.quantity, &mut effects)
        .await?;

    Ok((effects, CartItemsTemplate::new(cart)))
}

/// Remove a line from the cart (HTMX).
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<impl IntoResponse> {
    let mut effects = ClientEffects::new();
    let cart = view::remove_line(&cart_store(session), form.index, &mut effects).await?;

    Ok((effects, CartItemsTemplate::new(cart)))
}

/// Clear the cart (HTMX).
///
/// The browser asks for confirmation before sending `confirmed`; a request
/// without it leaves the cart as is.
#[instrument(skip(session))]
pub async fn clear(
    session: Session,
    Form(form): Form<ClearCartForm>,
) -> Result<impl IntoResponse> {
    let mut answer = Answered(form.confirmed.as_deref() == Some("true"));
    let mut effects = ClientEffects::new();
    let cart = view::clear(&cart_store(session), &mut answer, &mut effects).await?;

    Ok((effects, CartItemsTemplate::new(cart)))
}

/// Copy the order summary to the visitor's clipboard (HTMX).
///
/// The summary comes from the page's editable text, so visitor edits are
/// copied as shown.
#[instrument(skip(form))]
pub async fn copy(Form(form): Form<CopySummaryForm>) -> impl IntoResponse {
    let mut effects = ClientEffects::new();
    let mut toast = ClientEffects::new();
    order::copy_summary(&form.summary, &mut effects, &mut toast);
    effects.merge(toast);

    (StatusCode::NO_CONTENT, effects, ())
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> CartCountTemplate {
    let count = cart_store(session).load().await.total_quantity();
    CartCountTemplate { count }
}
