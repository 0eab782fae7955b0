//! End-to-end cart tests against a running storefront.
//!
//! Every test gets its own server and its own visitor session.

#![allow(clippy::unwrap_used)]

use closeout_core::order::COPY_CONFIRMATION;
use closeout_integration_tests::{TEST_ORDER_FORM_URL, TestContext, hx_trigger};
use reqwest::StatusCode;

const JAR: &[(&str, &str)] = &[
    ("sku", "CL-1001"),
    ("name", "Mason Jar 16oz"),
    ("cases-per-case", "12"),
    ("price-normal", "24.00"),
    ("price10", "21.50"),
    ("price50", "19.00"),
];

fn with_quantity<'a>(attrs: &[(&'a str, &'a str)], quantity: &'a str) -> Vec<(&'a str, &'a str)> {
    let mut form = attrs.to_vec();
    form.push(("quantity", quantity));
    form
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;
    assert_eq!(ctx.get_text("/health").await, "ok");
}

#[tokio::test]
async fn test_catalog_pages_render_add_controls() {
    let ctx = TestContext::new().await;

    let index = ctx.get_text("/").await;
    assert!(index.contains("href=\"/catalog/glassware\""));

    let page = ctx.get_text("/catalog/glassware").await;
    assert!(page.contains("name=\"sku\" value=\"CL-1001\""));
    assert!(page.contains("name=\"price10\" value=\"21.5\""));
    assert!(page.contains("<select name=\"quantity\""));
    assert!(page.contains("id=\"cart-count\""));
}

#[tokio::test]
async fn test_order_link_on_every_page() {
    let ctx = TestContext::new().await;
    let link = format!(
        "<a class=\"order-request-button\" href=\"{TEST_ORDER_FORM_URL}\" target=\"_blank\""
    );

    for path in ["/", "/catalog/glassware", "/cart"] {
        let page = ctx.get_text(path).await;
        assert!(page.contains(&link), "missing order link on {path}");
    }
}

#[tokio::test]
async fn test_unknown_catalog_page_is_404() {
    let ctx = TestContext::new().await;
    let response = ctx
        .client
        .get(ctx.url("/catalog/nope"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_security_and_request_id_headers() {
    let ctx = TestContext::new().await;
    let response = ctx.client.get(ctx.url("/cart")).send().await.unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.contains_key("content-security-policy"));
    assert!(headers.contains_key("x-request-id"));
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_empty_cart_page() {
    let ctx = TestContext::new().await;
    let page = ctx.get_text("/cart").await;

    assert!(page.contains("<p id=\"cart-empty-message\">"));
    assert!(page.contains("Grand Total: $0.00"));
    assert!(page.contains("<tbody id=\"cart-body\">"));
}

#[tokio::test]
async fn test_add_twice_merges_line() {
    let ctx = TestContext::new().await;

    let first = ctx.htmx_post("/cart/add", JAR).await;
    assert_eq!(first.status(), StatusCode::OK);
    let events = hx_trigger(&first);
    assert_eq!(events["cart-updated"]["count"], 1);
    assert_eq!(events["toast"]["message"], "Added 1 × Mason Jar 16oz to cart.");
    assert!(first.text().await.unwrap().contains(">1<"));

    let second = ctx.htmx_post("/cart/add", JAR).await;
    assert_eq!(hx_trigger(&second)["cart-updated"]["count"], 2);

    let page = ctx.get_text("/cart").await;
    assert!(page.contains("CL-1001: 2 case(s) @ $24.00 (Normal)"));
    assert_eq!(page.matches("hx-post=\"/cart/update\"").count(), 1);
    assert!(page.contains("Grand Total: $48.00"));
    assert!(page.contains("id=\"cart-empty-message\" hidden"));

    assert!(ctx.get_text("/cart/count").await.contains(">2<"));
}

#[tokio::test]
async fn test_quantity_selector_unlocks_tier() {
    let ctx = TestContext::new().await;

    ctx.htmx_post("/cart/add", &with_quantity(JAR, "10")).await;

    let page = ctx.get_text("/cart").await;
    assert!(page.contains("CL-1001: 10 case(s) @ $21.50 (Closeout 10+)"));
    assert!(page.contains("Grand Total: $215.00"));
    assert!(page.contains("class=\"active-price-tier\">$21.50"));
}

#[tokio::test]
async fn test_add_without_sku_is_rejected() {
    let ctx = TestContext::new().await;

    let response = ctx
        .htmx_post("/cart/add", &[("name", "Nameless"), ("price-normal", "3")])
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(ctx.get_text("/cart/count").await.contains(">0<"));
}

#[tokio::test]
async fn test_update_quantity_and_remove_on_invalid() {
    let ctx = TestContext::new().await;
    ctx.htmx_post("/cart/add", JAR).await;

    let response = ctx
        .htmx_post("/cart/update", &[("index", "0"), ("quantity", "50")])
        .await;
    assert_eq!(hx_trigger(&response)["cart-updated"]["count"], 50);
    let fragment = response.text().await.unwrap();
    assert!(fragment.contains("CL-1001: 50 case(s) @ $19.00 (Closeout 50+)"));
    assert!(fragment.contains("Grand Total: $950.00"));

    let response = ctx
        .htmx_post("/cart/update", &[("index", "0"), ("quantity", "abc")])
        .await;
    let fragment = response.text().await.unwrap();
    assert!(fragment.contains("<p id=\"cart-empty-message\">"));
    assert!(fragment.contains("Grand Total: $0.00"));
}

#[tokio::test]
async fn test_remove_line() {
    let ctx = TestContext::new().await;
    ctx.htmx_post("/cart/add", JAR).await;
    ctx.htmx_post(
        "/cart/add",
        &[("sku", "CL-1002"), ("name", "Mason Jar 32oz"), ("price-normal", "10")],
    )
    .await;

    let response = ctx.htmx_post("/cart/remove", &[("index", "0")]).await;

    assert_eq!(hx_trigger(&response)["cart-updated"]["count"], 1);
    let fragment = response.text().await.unwrap();
    assert!(!fragment.contains("CL-1001"));
    assert!(fragment.contains("CL-1002: 1 case(s) @ $10.00 (Normal)"));
}

#[tokio::test]
async fn test_clear_requires_confirmation() {
    let ctx = TestContext::new().await;
    ctx.htmx_post("/cart/add", &with_quantity(JAR, "3")).await;

    let declined = ctx.htmx_post("/cart/clear", &[]).await;
    assert!(declined.headers().get("hx-trigger").is_none());
    assert!(declined.text().await.unwrap().contains("Grand Total: $72.00"));

    let confirmed = ctx.htmx_post("/cart/clear", &[("confirmed", "true")]).await;
    assert_eq!(hx_trigger(&confirmed)["cart-updated"]["count"], 0);
    let fragment = confirmed.text().await.unwrap();
    assert!(fragment.contains("Grand Total: $0.00"));
    assert!(fragment.contains("<textarea id=\"cart-summary\" name=\"summary\" rows=\"6\"></textarea>"));
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let alice = TestContext::new().await;
    alice.htmx_post("/cart/add", JAR).await;

    let other_client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap();
    let count = other_client
        .get(alice.url("/cart/count"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(count.contains(">0<"));
}

// ============================================================================
// Order handoff
// ============================================================================

#[tokio::test]
async fn test_copy_summary() {
    let ctx = TestContext::new().await;

    let response = ctx
        .htmx_post("/cart/copy", &[("summary", "CL-1001: 1 case(s) @ $24.00 (Normal)")])
        .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let events = hx_trigger(&response);
    assert_eq!(
        events["clipboard-write"]["text"],
        "CL-1001: 1 case(s) @ $24.00 (Normal)"
    );
    assert_eq!(events["toast"]["message"], COPY_CONFIRMATION);
}

#[tokio::test]
async fn test_order_copies_and_opens_form() {
    let ctx = TestContext::new().await;

    let response = ctx
        .htmx_post("/order", &[("summary", "  CL-1001: 2 case(s) @ $24.00 (Normal)\n")])
        .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let events = hx_trigger(&response);
    assert_eq!(
        events["clipboard-write"]["text"],
        "CL-1001: 2 case(s) @ $24.00 (Normal)"
    );
    assert_eq!(events["open-order-form"]["url"], TEST_ORDER_FORM_URL);
}

#[tokio::test]
async fn test_order_without_summary_only_opens_form() {
    let ctx = TestContext::new().await;

    let response = ctx.htmx_post("/order", &[]).await;

    let events = hx_trigger(&response);
    assert!(events.get("clipboard-write").is_none());
    assert_eq!(events["open-order-form"]["url"], TEST_ORDER_FORM_URL);
}

#[tokio::test]
async fn test_plain_order_post_redirects_to_form() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .post(ctx.url("/order"))
        .form(&[("summary", "CL-1001: 1 case(s)")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").unwrap(),
        TEST_ORDER_FORM_URL
    );
}
