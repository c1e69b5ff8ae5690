//! Wishlist route handlers.

use axum::{Json, extract::State};
use bazaar_core::{ProductId, ProductSnapshot};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::VisitorSession;
use crate::routes::products::find_product;
use crate::state::AppState;
use crate::store::{StoreAction, StoreOutcome, WishlistChange};

/// Wishlist display data, ordered by product id.
#[derive(Debug, Serialize)]
pub struct WishlistView {
    pub items: Vec<ProductSnapshot>,
    pub count: usize,
}

/// Toggle request body.
#[derive(Debug, Deserialize)]
pub struct ToggleWishlistRequest {
    pub product_id: ProductId,
}

/// Toggle result.
#[derive(Debug, Serialize)]
pub struct ToggleWishlistResponse {
    pub product_id: ProductId,
    pub change: WishlistChange,
    pub wishlisted: bool,
    pub count: usize,
}

/// Show the wishlist.
#[instrument(skip(visitor))]
pub async fn show(visitor: VisitorSession) -> Json<WishlistView> {
    let items: Vec<ProductSnapshot> = visitor.store.wishlist().cloned().collect();
    Json(WishlistView {
        count: items.len(),
        items,
    })
}

/// Add the product to the wishlist, or remove it if already there.
#[instrument(skip(state, visitor))]
pub async fn toggle(
    State(state): State<AppState>,
    mut visitor: VisitorSession,
    Json(request): Json<ToggleWishlistRequest>,
) -> Result<Json<ToggleWishlistResponse>> {
    let id = request.product_id;

    // Removal needs no catalog lookup; the stored snapshot is enough.
    let product = match visitor.store.wishlist_entry(id) {
        Some(snapshot) => snapshot.clone(),
        None => find_product(&state, id).await?.snapshot(),
    };

    let change = match visitor
        .store
        .dispatch(StoreAction::ToggleWishlist { product })?
    {
        StoreOutcome::Wishlist(change) => change,
        outcome => {
            return Err(AppError::Internal(format!(
                "Unexpected wishlist outcome: {outcome:?}"
            )));
        }
    };
    visitor.save().await?;

    let message = match change {
        WishlistChange::Added => "Added to wishlist",
        WishlistChange::Removed => "Removed from wishlist",
    };
    add_breadcrumb("wishlist", message, Some(&[("product_id", &id.to_string())]));

    Ok(Json(ToggleWishlistResponse {
        product_id: id,
        change,
        wishlisted: change == WishlistChange::Added,
        count: visitor.store.wishlist_len(),
    }))
}
