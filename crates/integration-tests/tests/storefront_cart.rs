//! Integration tests for the session-backed cart and wishlist.

use bazaar_integration_tests::{TestContext, ids};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_add_merges_lines() {
    let ctx = TestContext::new().await;

    let (status, cart) = ctx
        .post("/cart/add", json!({"product_id": 1, "quantity": 2}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["subtotal"], "$20.00");
    assert_eq!(cart["item_count"], 2);

    let (_, cart) = ctx
        .post("/cart/add", json!({"product_id": 1, "quantity": 3}))
        .await;
    assert_eq!(cart["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(cart["items"][0]["quantity"], 5);
    assert_eq!(cart["subtotal"], "$50.00");

    let (_, count) = ctx.get("/cart/count").await;
    assert_eq!(count["count"], 5);
}

#[tokio::test]
async fn test_add_defaults_to_one_unit() {
    let ctx = TestContext::new().await;
    ctx.post("/cart/add", json!({"product_id": 2})).await;
    ctx.post("/cart/add", json!({"product_id": 3})).await;

    let (_, cart) = ctx.get("/cart").await;
    assert_eq!(ids(&cart["items"]), [2, 3]);
    assert_eq!(cart["item_count"], 2);
    assert_eq!(cart["subtotal"], "$12.75");
}

#[tokio::test]
async fn test_invalid_quantities_rejected() {
    let ctx = TestContext::new().await;
    ctx.post("/cart/add", json!({"product_id": 1, "quantity": 4}))
        .await;

    let (status, body) = ctx
        .post("/cart/add", json!({"product_id": 1, "quantity": 0}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().starts_with("Invalid quantity"));

    let (status, _) = ctx
        .post("/cart/update", json!({"product_id": 1, "quantity": -1}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, count) = ctx.get("/cart/count").await;
    assert_eq!(count["count"], 4);
}

#[tokio::test]
async fn test_max_quantity_per_line() {
    let ctx = TestContext::new().await;
    ctx.post("/cart/add", json!({"product_id": 1, "quantity": 8}))
        .await;

    let (status, body) = ctx
        .post("/cart/add", json!({"product_id": 1, "quantity": 3}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Maximum quantity is 10");

    let (status, _) = ctx
        .post("/cart/update", json!({"product_id": 1, "quantity": 11}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, cart) = ctx
        .post("/cart/update", json!({"product_id": 1, "quantity": 10}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["item_count"], 10);
}

#[tokio::test]
async fn test_update_and_remove() {
    let ctx = TestContext::new().await;
    ctx.post("/cart/add", json!({"product_id": 1})).await;
    ctx.post("/cart/add", json!({"product_id": 2})).await;

    let (_, cart) = ctx
        .post("/cart/update", json!({"product_id": 2, "quantity": 4}))
        .await;
    assert_eq!(cart["item_count"], 5);

    // Updating a product not in the cart is a no-op.
    let (status, cart) = ctx
        .post("/cart/update", json!({"product_id": 9, "quantity": 2}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&cart["items"]), [1, 2]);

    let (_, cart) = ctx.post("/cart/remove", json!({"product_id": 1})).await;
    assert_eq!(ids(&cart["items"]), [2]);

    let (status, cart) = ctx.post("/cart/remove", json!({"product_id": 1})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&cart["items"]), [2]);

    let (_, cart) = ctx.post("/cart/clear", json!({})).await;
    assert_eq!(cart["item_count"], 0);
    assert_eq!(cart["subtotal"], "$0.00");
}

#[tokio::test]
async fn test_unknown_product_not_added() {
    let ctx = TestContext::new().await;
    let (status, _) = ctx.post("/cart/add", json!({"product_id": 999})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, cart) = ctx.get("/cart").await;
    assert_eq!(cart["item_count"], 0);
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let ctx = TestContext::new().await;
    let other = ctx.other_visitor();

    ctx.post("/cart/add", json!({"product_id": 1, "quantity": 2}))
        .await;
    other.post("/cart/add", json!({"product_id": 3})).await;

    let (_, mine) = ctx.get("/cart").await;
    let (_, theirs) = other.get("/cart").await;
    assert_eq!(ids(&mine["items"]), [1]);
    assert_eq!(ids(&theirs["items"]), [3]);
}

#[tokio::test]
async fn test_product_detail_reflects_cart() {
    let ctx = TestContext::new().await;
    ctx.post("/cart/add", json!({"product_id": 2, "quantity": 3}))
        .await;
    let (_, product) = ctx.get("/products/2").await;
    assert_eq!(product["in_cart"], 3);
}

// ============================================================================
// Wishlist
// ============================================================================

#[tokio::test]
async fn test_toggle_wishlist_twice() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.post("/wishlist/toggle", json!({"product_id": 7})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["change"], "added");
    assert_eq!(body["wishlisted"], true);

    let (_, wishlist) = ctx.get("/wishlist").await;
    assert_eq!(ids(&wishlist["items"]), [7]);

    let (_, body) = ctx.post("/wishlist/toggle", json!({"product_id": 7})).await;
    assert_eq!(body["change"], "removed");
    assert_eq!(body["wishlisted"], false);
    assert_eq!(body["count"], 0);

    let (_, wishlist) = ctx.get("/wishlist").await;
    assert!(ids(&wishlist["items"]).is_empty());
}

#[tokio::test]
async fn test_wishlist_ordered_by_id() {
    let ctx = TestContext::new().await;
    for id in [9, 2, 5] {
        ctx.post("/wishlist/toggle", json!({"product_id": id})).await;
    }

    let (_, wishlist) = ctx.get("/wishlist").await;
    assert_eq!(ids(&wishlist["items"]), [2, 5, 9]);
    assert_eq!(wishlist["count"], 3);

    let (_, product) = ctx.get("/products/5").await;
    assert_eq!(product["wishlisted"], true);
}
