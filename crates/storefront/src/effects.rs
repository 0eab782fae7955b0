//! Client-side effects delivered as HTMX events.
//!
//! The server cannot update a badge, show a toast, write to the visitor's
//! clipboard or open a tab. Handlers collect those requests in
//! [`ClientEffects`], which is sent as a JSON `HX-Trigger` header and
//! executed by `static/js/cart.js`.
//!
//! | Event | Detail |
//! |---|---|
//! | `cart-updated` | `{"count": n}` |
//! | `toast` | `{"message": "..."}` |
//! | `clipboard-write` | `{"text": "..."}` |
//! | `open-order-form` | `{"url": "..."}` |

use axum::http::{HeaderName, HeaderValue};
use axum::response::{IntoResponseParts, ResponseParts};
use closeout_core::host::{Clipboard, ClipboardError, CountDisplay, FormOpener, Notifier};
use serde_json::{Map, Value, json};

/// Response header carrying the events.
pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

pub const CART_UPDATED: &str = "cart-updated";
pub const TOAST: &str = "toast";
pub const CLIPBOARD_WRITE: &str = "clipboard-write";
pub const OPEN_ORDER_FORM: &str = "open-order-form";

/// Events to trigger on the client, keyed by event name.
///
/// Recording the same event twice keeps the latest detail.
#[derive(Debug, Clone, Default)]
pub struct ClientEffects {
    events: Map<String, Value>,
}

impl ClientEffects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn trigger(&mut self, event: &str, detail: Value) {
        self.events.insert(event.to_string(), detail);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Fold another set of effects into this one; `other` wins on clashes.
    pub fn merge(&mut self, other: Self) {
        self.events.extend(other.events);
    }

    /// Detail recorded for `event`, if any.
    #[must_use]
    pub fn get(&self, event: &str) -> Option<&Value> {
        self.events.get(event)
    }

    /// The `HX-Trigger` header value, or `None` when nothing was recorded
    /// or the payload is not a valid header value.
    #[must_use]
    pub fn header_value(&self) -> Option<HeaderValue> {
        if self.events.is_empty() {
            return None;
        }
        let payload = escape_non_ascii(&Value::Object(self.events.clone()).to_string());
        match HeaderValue::from_str(&payload) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "Dropping client effects with invalid header value");
                None
            }
        }
    }
}

/// Replace non-ASCII characters and DEL with JSON `\uXXXX` escapes.
///
/// Header values must be visible ASCII, and browsers read them as Latin-1.
/// `serde_json` already escapes the other control characters. Both can only
/// occur inside JSON strings, where the escape is equivalent.
fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() && !c.is_ascii_control() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}

impl CountDisplay for ClientEffects {
    fn show_count(&mut self, count: u64) {
        self.trigger(CART_UPDATED, json!({ "count": count }));
    }
}

impl Notifier for ClientEffects {
    fn notify(&mut self, message: &str) {
        self.trigger(TOAST, json!({ "message": message }));
    }
}

impl Clipboard for ClientEffects {
    /// Queues the write; whether the browser allows it is only known
    /// client-side, where failures are ignored.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.trigger(CLIPBOARD_WRITE, json!({ "text": text }));
        Ok(())
    }
}

impl FormOpener for ClientEffects {
    fn open_in_new_tab(&mut self, url: &str) {
        self.trigger(OPEN_ORDER_FORM, json!({ "url": url }));
    }
}

impl IntoResponseParts for ClientEffects {
    type Error = std::convert::Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(value) = self.header_value() {
            res.headers_mut().insert(HX_TRIGGER, value);
        }
        Ok(res)
    }
}
