//! Integration tests for health checks, product listing and search.

#![allow(clippy::unwrap_used)]

use bazaar_integration_tests::{FAKE_CATEGORIES, TestContext, ids};
use bazaar_storefront::catalog::LOAD_FAILED_MESSAGE;
use reqwest::StatusCode;

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_and_readiness() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .get(format!("{}/health", ctx.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let (status, _) = ctx.get("/health/ready").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_not_ready_until_catalog_loaded() {
    let ctx = TestContext::not_ready().await;

    let (status, _) = ctx.get("/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = ctx.get("/search?q=red").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_ready"], false);
    assert_eq!(body["total"], 0);

    // Listing falls back to the catalog API.
    let (status, body) = ctx.get("/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 10);
}

#[tokio::test]
async fn test_failed_catalog_load_reaches_visitors() {
    let ctx = TestContext::catalog_down().await;

    let (status, _) = ctx.get("/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    for path in ["/search?q=red", "/search/suggest?q=red"] {
        let (status, body) = ctx.get(path).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{path}");
        assert_eq!(body["error"], LOAD_FAILED_MESSAGE, "{path}");
    }

    let (status, body) = ctx.get("/products").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], LOAD_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let ctx = TestContext::new().await;
    let response = ctx
        .client
        .get(format!("{}/health", ctx.base_url))
        .header("x-request-id", "abc-123")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_product_pages() {
    let ctx = TestContext::new().await;

    let (status, page) = ctx.get("/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&page["products"]), [1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(page["limit"], 8);
    assert_eq!(page["total"], 10);
    assert_eq!(page["has_more"], true);

    let (_, page) = ctx.get("/products?offset=8").await;
    assert_eq!(ids(&page["products"]), [9, 10]);
    assert_eq!(page["has_more"], false);

    let (_, page) = ctx.get("/products?offset=2&limit=3").await;
    assert_eq!(ids(&page["products"]), [3, 4, 5]);
}

#[tokio::test]
async fn test_categories() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/products/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!(FAKE_CATEGORIES));
}

#[tokio::test]
async fn test_product_detail() {
    let ctx = TestContext::new().await;

    let (status, product) = ctx.get("/products/10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["title"], "Winter Jacket");
    let compare_at: f64 = product["compare_at_price"]["amount"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((compare_at - 100.0).abs() < f64::EPSILON);
    assert_eq!(product["images"][0], "https://img.test/10-thumb.jpg");
    assert_eq!(product["wishlisted"], false);
    assert_eq!(product["in_cart"], 0);

    assert!(product["stars"].is_null());

    let (_, product) = ctx.get("/products/1").await;
    assert_eq!(product["stars"]["full"], 4);
    assert_eq!(product["stars"]["half"], false);

    let (status, _) = ctx.get("/products/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recently_viewed_keeps_five_newest() {
    let ctx = TestContext::new().await;

    for id in 1..=6 {
        let (status, _) = ctx.get(&format!("/products/{id}")).await;
        assert_eq!(status, StatusCode::OK);
    }
    // Re-viewing a present product does not move it.
    ctx.get("/products/4").await;

    let (status, viewed) = ctx.get("/recently-viewed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&viewed), [6, 5, 4, 3, 2]);

    // Another visitor has their own history.
    let (_, viewed) = ctx.other_visitor().get("/recently-viewed").await;
    assert!(ids(&viewed).is_empty());
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_red_keeps_catalog_order() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/search?q=red").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["products"]), [1, 3]);
    assert_eq!(body["is_ready"], true);
}

#[tokio::test]
async fn test_search_fields_and_case() {
    let ctx = TestContext::new().await;

    let (_, body) = ctx.get("/search?q=WOOL").await;
    assert_eq!(ids(&body["products"]), [3]);

    let (_, body) = ctx.get("/search?q=hats").await;
    assert_eq!(ids(&body["products"]), [2, 3]);
}

#[tokio::test]
async fn test_blank_search_is_empty() {
    let ctx = TestContext::new().await;
    for path in ["/search", "/search?q=", "/search?q=%20%20"] {
        let (status, body) = ctx.get(path).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0, "{path}");
    }
}

#[tokio::test]
async fn test_search_keeps_surrounding_spaces() {
    let ctx = TestContext::new().await;

    let (_, body) = ctx.get("/search?q=%20hat").await;
    assert_eq!(ids(&body["products"]), [2, 3]);
    assert_eq!(body["query"], " hat");

    let (status, body) = ctx.get("/search?q=hat%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_suggest_truncates_to_five() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/search/suggest?q=tee").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["products"]), [4, 5, 6, 7, 8]);
    assert_eq!(body["total"], 6);
    assert_eq!(body["has_more"], true);
}
