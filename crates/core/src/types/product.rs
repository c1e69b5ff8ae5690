//! Catalog product records and the snapshots copied out of them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;

/// Customer rating summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating on a 0-5 scale.
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

impl Rating {
    /// Number of full stars to render.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=5
    pub fn full_stars(&self) -> u8 {
        self.rate.clamp(0.0, 5.0).floor() as u8
    }

    /// Whether a half star follows the full stars.
    #[must_use]
    pub fn has_half_star(&self) -> bool {
        self.rate < 5.0 && self.rate.fract() >= 0.5
    }
}

/// A product owned by the remote catalog.
///
/// Read-only from the storefront's point of view: cart, wishlist and
/// recently-viewed state only ever hold a [`ProductSnapshot`] copied out of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub price: Price,
    /// Discount already applied to `price`, in percent.
    pub discount_percentage: Decimal,
    /// Image URLs, primary image first.
    pub images: Vec<String>,
    pub rating: Option<Rating>,
}

impl Product {
    /// Primary image URL, if any.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Price before the discount, when the product is discounted.
    #[must_use]
    pub fn compare_at_price(&self) -> Option<Price> {
        self.price.before_discount(self.discount_percentage)
    }

    /// Copy the fields the store keeps.
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot::from(self)
    }
}

/// A denormalized copy of the product fields shown in the cart, wishlist and
/// recently-viewed lists.
///
/// Not kept in sync with the catalog after it is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub category: String,
    pub image: Option<String>,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            category: product.category.clone(),
            image: product.thumbnail().map(String::from),
        }
    }
}
