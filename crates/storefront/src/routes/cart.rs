//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Every mutation goes through
//! [`Store::dispatch`](crate::store::Store::dispatch) and returns the updated
//! cart view.

use axum::{Json, extract::State};
use bazaar_core::{CartLineItem, ProductId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::VisitorSession;
use crate::routes::products::find_product;
use crate::state::AppState;
use crate::store::{Store, StoreAction};

/// Cart item display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub category: String,
    pub image: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&CartLineItem> for CartItemView {
    fn from(line: &CartLineItem) -> Self {
        Self {
            id: line.id(),
            title: line.product.title.clone(),
            category: line.product.category.clone(),
            image: line.product.image.clone(),
            quantity: line.quantity.get(),
            price: line.product.price.display(),
            line_price: line.line_total().display(),
        }
    }
}

impl From<&Store> for CartView {
    fn from(store: &Store) -> Self {
        Self {
            items: store.cart().iter().map(CartItemView::from).collect(),
            subtotal: store.cart_total().display(),
            item_count: store.cart_item_count(),
        }
    }
}

/// Cart count badge.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: Option<i64>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// Reject quantities above the per-line limit before they reach the store.
fn check_max_quantity(state: &AppState, quantity: i64) -> Result<()> {
    let max = state.config().cart.max_quantity_per_item;
    if quantity > i64::from(max) {
        return Err(AppError::BadRequest(format!("Maximum quantity is {max}")));
    }
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

/// Show the cart.
#[instrument(skip(visitor))]
pub async fn show(visitor: VisitorSession) -> Json<CartView> {
    Json(CartView::from(&visitor.store))
}

/// Total units in the cart.
#[instrument(skip(visitor))]
pub async fn count(visitor: VisitorSession) -> Json<CartCount> {
    Json(CartCount {
        count: visitor.store.cart_item_count(),
    })
}

/// Add a product to the cart, merging with an existing line.
#[instrument(skip(state, visitor))]
pub async fn add(
    State(state): State<AppState>,
    mut visitor: VisitorSession,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let id = request.product_id;
    let in_cart = visitor
        .store
        .cart_line(id)
        .map_or(0, |line| i64::from(line.quantity.get()));
    check_max_quantity(&state, in_cart.saturating_add(request.quantity.unwrap_or(1)))?;

    let product = find_product(&state, id).await?;
    visitor.store.dispatch(StoreAction::AddToCart {
        item: product.snapshot(),
        quantity: request.quantity,
    })?;
    visitor.save().await?;

    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", &id.to_string())]));
    Ok(Json(CartView::from(&visitor.store)))
}

/// Set the quantity of a cart line.
#[instrument(skip(state, visitor))]
pub async fn update(
    State(state): State<AppState>,
    mut visitor: VisitorSession,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    check_max_quantity(&state, request.quantity)?;

    visitor.store.dispatch(StoreAction::UpdateQuantity {
        id: request.product_id,
        quantity: request.quantity,
    })?;
    visitor.save().await?;

    Ok(Json(CartView::from(&visitor.store)))
}

/// Remove a cart line. Removing an absent product is a no-op.
#[instrument(skip(visitor))]
pub async fn remove(
    mut visitor: VisitorSession,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    visitor.store.dispatch(StoreAction::RemoveFromCart {
        id: request.product_id,
    })?;
    visitor.save().await?;

    add_breadcrumb(
        "cart",
        "Removed from cart",
        Some(&[("product_id", &request.product_id.to_string())]),
    );
    Ok(Json(CartView::from(&visitor.store)))
}

/// Empty the cart.
#[instrument(skip(visitor))]
pub async fn clear(mut visitor: VisitorSession) -> Result<Json<CartView>> {
    visitor.store.dispatch(StoreAction::ClearCart)?;
    visitor.save().await?;
    Ok(Json(CartView::from(&visitor.store)))
}
