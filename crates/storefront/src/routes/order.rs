//! Order request handler.
//!
//! Orders go through an externally hosted form. HTMX requests get the
//! summary copied and the form opened in a new tab via client effects;
//! plain form posts are redirected to the form.

use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use closeout_core::order::{self, OrderHandoff};
use serde::Deserialize;
use tracing::instrument;

use crate::effects::ClientEffects;
use crate::error::add_breadcrumb;
use crate::state::AppState;

/// Order request form data.
#[derive(Debug, Deserialize)]
pub struct OrderRequestForm {
    /// The summary as currently shown, including visitor edits.
    pub summary: Option<String>,
}

/// Whether the request was issued by HTMX.
fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

/// Client effects for an HTMX order request.
///
/// The form-opening event never depends on the rest of the payload: if the
/// combined events cannot be sent as a header, only the opener is kept.
fn order_effects(summary: Option<&str>, form_url: &str) -> (ClientEffects, OrderHandoff) {
    let mut effects = ClientEffects::new();
    let mut opener = ClientEffects::new();
    let handoff = order::request_order(summary, form_url, &mut effects, &mut opener);
    effects.merge(opener.clone());

    if effects.header_value().is_none() {
        tracing::warn!("Order effects rejected as a header, sending the form link only");
        return (opener, handoff);
    }
    (effects, handoff)
}

/// Hand the order over to the external form.
#[instrument(skip(state, headers, form))]
pub async fn request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<OrderRequestForm>,
) -> Response {
    let form_url = state.config().order_form_url.as_str();

    if !is_htmx(&headers) {
        tracing::info!("Order form requested without HTMX, redirecting");
        return Redirect::to(form_url).into_response();
    }

    let (effects, handoff) = order_effects(form.summary.as_deref(), form_url);

    let copied = if handoff == OrderHandoff::CopiedAndOpened {
        "true"
    } else {
        "false"
    };
    add_breadcrumb("order", "Order form opened", Some(&[("summary_copied", copied)]));

    (StatusCode::NO_CONTENT, effects, ()).into_response()
}
