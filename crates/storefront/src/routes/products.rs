//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use bazaar_core::{Price, Product, ProductId, ProductSnapshot, Rating};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::VisitorSession;
use crate::state::AppState;
use crate::store::{StoreAction, StoreOutcome};

/// Products shown per "load more" page.
const PRODUCTS_PER_PAGE: usize = 8;

/// Upper bound on `limit`.
const MAX_PRODUCTS_PER_PAGE: usize = 100;

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub offset: usize,
    pub limit: Option<usize>,
}

/// One page of the catalog.
#[derive(Debug, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub offset: usize,
    pub limit: usize,
    pub total: usize,
    pub has_more: bool,
}

/// Product detail response.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    /// Price before discount, when discounted.
    pub compare_at_price: Option<Price>,
    /// Star row for the rating, when the product has one.
    pub stars: Option<StarSummary>,
    pub wishlisted: bool,
    /// Units of this product already in the cart.
    pub in_cart: u32,
}

/// Full stars plus an optional half star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarSummary {
    pub full: u8,
    pub half: bool,
}

impl From<&Rating> for StarSummary {
    fn from(rating: &Rating) -> Self {
        Self {
            full: rating.full_stars(),
            half: rating.has_half_star(),
        }
    }
}

// =============================================================================
// Lookup Helpers
// =============================================================================

/// All catalog products: the search snapshot once loaded, the API before.
async fn all_products(state: &AppState) -> Result<Vec<Product>> {
    if let Some(snapshot) = state.search().snapshot()? {
        return Ok(snapshot.to_vec());
    }
    Ok(state.catalog().get_products().await?)
}

/// Look up a product by id, preferring the loaded snapshot.
///
/// # Errors
///
/// Returns `AppError::Catalog(NotFound)` for an unknown id.
pub async fn find_product(state: &AppState, id: ProductId) -> Result<Product> {
    if let Some(product) = state.search().get(id)? {
        return Ok(product);
    }
    Ok(state.catalog().get_product(id).await?)
}

// =============================================================================
// Handlers
// =============================================================================

/// Catalog listing, `limit` products starting at `offset`.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ProductPage>> {
    let limit = query
        .limit
        .unwrap_or(PRODUCTS_PER_PAGE)
        .clamp(1, MAX_PRODUCTS_PER_PAGE);

    let products = all_products(&state).await?;
    let total = products.len();
    let page: Vec<Product> = products.into_iter().skip(query.offset).take(limit).collect();
    let has_more = query.offset.saturating_add(page.len()) < total;

    Ok(Json(ProductPage {
        products: page,
        offset: query.offset,
        limit,
        total,
        has_more,
    }))
}

/// Product detail. Records the product as recently viewed.
#[instrument(skip(state, visitor), fields(product_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    mut visitor: VisitorSession,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetail>> {
    let product = find_product(&state, id).await?;

    let outcome = visitor.store.dispatch(StoreAction::AddToRecentlyViewed {
        product: product.snapshot(),
    })?;
    if outcome == StoreOutcome::Viewed(true) {
        visitor.save().await?;
    }

    Ok(Json(ProductDetail {
        compare_at_price: product.compare_at_price(),
        stars: product.rating.as_ref().map(StarSummary::from),
        wishlisted: visitor.store.is_wishlisted(id),
        in_cart: visitor.store.cart_line(id).map_or(0, |line| line.quantity.get()),
        product,
    }))
}

/// Category names.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.catalog().get_categories().await?))
}

/// Recently viewed products, newest first.
#[instrument(skip(visitor))]
pub async fn recently_viewed(visitor: VisitorSession) -> Json<Vec<ProductSnapshot>> {
    Json(visitor.store.recently_viewed().cloned().collect())
}
