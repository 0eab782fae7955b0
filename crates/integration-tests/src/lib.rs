//! Integration tests for the Closeout storefront.
//!
//! Each test starts the full router on an ephemeral local port and drives it
//! over HTTP with a cookie-keeping client, so the session (and with it the
//! cart) carries across requests exactly as in a browser.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p closeout-integration-tests
//! ```

use std::net::SocketAddr;

use closeout_storefront::catalog::{CatalogStore, parse_page};
use closeout_storefront::config::StorefrontConfig;
use closeout_storefront::state::AppState;
use reqwest::Client;

/// Order form used by the test configuration.
pub const TEST_ORDER_FORM_URL: &str = "https://forms.example.com/closeout-order";

/// Catalog page served as `/catalog/glassware`.
pub const GLASSWARE_PAGE: &str = r"
title: Glassware Closeouts
quantities: [1, 5, 10]
items:
  - sku: CL-1001
    name: Mason Jar 16oz
    cases-per-case: 12
    price-normal: 24.00
    price10: 21.50
    price50: 19.00
  - sku: CL-1002
    name: Mason Jar 32oz
    price-normal: 10
";

/// A running storefront and a client bound to one visitor session.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Start a storefront with the test catalog.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    #[allow(clippy::unwrap_used)]
    pub async fn new() -> Self {
        let config = StorefrontConfig::from_lookup(|key| match key {
            "CLOSEOUT_ORDER_FORM_URL" => Some(TEST_ORDER_FORM_URL.to_string()),
            _ => None,
        })
        .unwrap();
        let page = parse_page("glassware".to_string(), GLASSWARE_PAGE).unwrap();
        let state = AppState::new(config, CatalogStore::from_pages(vec![page]));
        let app = closeout_storefront::app(state);

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                panic!("test server failed: {e}");
            }
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            client,
            base_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL for a path on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST a form as HTMX does.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    #[allow(clippy::unwrap_used)]
    pub async fn htmx_post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header("HX-Request", "true")
            .form(form)
            .send()
            .await
            .unwrap()
    }

    /// GET a page body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    #[allow(clippy::unwrap_used)]
    pub async fn get_text(&self, path: &str) -> String {
        self.client
            .get(self.url(path))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap()
    }
}

/// The `HX-Trigger` events of a response as JSON.
///
/// # Panics
///
/// Panics if the header is missing or not JSON.
#[allow(clippy::unwrap_used)]
#[must_use]
pub fn hx_trigger(response: &reqwest::Response) -> serde_json::Value {
    let header = response.headers().get("hx-trigger").unwrap().to_str().unwrap();
    serde_json::from_str(header).unwrap()
}
