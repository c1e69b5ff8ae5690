//! Cart, wishlist and recently-viewed state for one visitor.
//!
//! The [`Store`] is a plain value: it is constructed empty, mutated only
//! through [`Store::dispatch`] (or the typed methods it routes to), and
//! serialized into the visitor's session between requests. There is no
//! process-wide store.
//!
//! Invariants:
//! - the cart holds at most one line per product id, each with at least one unit
//! - the wishlist is a set of product ids (mapped to snapshots for display)
//! - recently viewed holds at most [`RECENTLY_VIEWED_CAPACITY`] distinct
//!   products, newest first

mod action;

use std::collections::{BTreeMap, VecDeque};

use bazaar_core::{
    CartLineItem, CurrencyCode, Price, ProductId, ProductSnapshot, Quantity, QuantityError,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use action::{StoreAction, StoreOutcome, WishlistChange};

/// Maximum number of recently viewed products kept.
pub const RECENTLY_VIEWED_CAPACITY: usize = 5;

/// Store errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),
}

/// Visitor state: cart lines, wishlist and recently viewed products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Store {
    cart: Vec<CartLineItem>,
    wishlist: BTreeMap<ProductId, ProductSnapshot>,
    recently_viewed: VecDeque<ProductSnapshot>,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidQuantity` if the action carries a quantity
    /// below 1 (or one that would overflow). The state is left unchanged.
    pub fn dispatch(&mut self, action: StoreAction) -> Result<StoreOutcome, StoreError> {
        let name = action.name();
        let outcome = match action {
            StoreAction::AddToCart { item, quantity } => {
                let quantity = quantity.map_or(Ok(Quantity::ONE), Quantity::new)?;
                let id = item.id;
                let quantity = self.add_to_cart(item, quantity)?;
                StoreOutcome::CartLine { id, quantity }
            }
            StoreAction::RemoveFromCart { id } => StoreOutcome::Removed(self.remove_from_cart(id)),
            StoreAction::UpdateQuantity { id, quantity } => {
                let quantity = Quantity::new(quantity)?;
                StoreOutcome::Updated(self.update_quantity(id, quantity))
            }
            StoreAction::ClearCart => {
                self.clear_cart();
                StoreOutcome::Cleared
            }
            StoreAction::ToggleWishlist { product } => {
                StoreOutcome::Wishlist(self.toggle_wishlist(product))
            }
            StoreAction::AddToRecentlyViewed { product } => {
                StoreOutcome::Viewed(self.add_to_recently_viewed(product))
            }
        };
        debug!(action = name, ?outcome, "Store action applied");
        Ok(outcome)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add `quantity` units of `item`, merging into an existing line.
    ///
    /// Returns the line's new quantity. No upper bound is enforced here;
    /// per-line limits are a caller policy.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidQuantity` if the merged quantity overflows.
    pub fn add_to_cart(
        &mut self,
        item: ProductSnapshot,
        quantity: Quantity,
    ) -> Result<Quantity, StoreError> {
        if let Some(line) = self.cart.iter_mut().find(|line| line.id() == item.id) {
            line.quantity = line.quantity.checked_add(quantity)?;
            return Ok(line.quantity);
        }
        self.cart.push(CartLineItem::new(item, quantity));
        Ok(quantity)
    }

    /// Remove the line for `id`. Returns `false` (a no-op) if there is none.
    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        let before = self.cart.len();
        self.cart.retain(|line| line.id() != id);
        self.cart.len() != before
    }

    /// Set the quantity of the line for `id`. Returns `false` (a no-op) if there is none.
    pub fn update_quantity(&mut self, id: ProductId, quantity: Quantity) -> bool {
        match self.cart.iter_mut().find(|line| line.id() == id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[CartLineItem] {
        &self.cart
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn cart_line(&self, id: ProductId) -> Option<&CartLineItem> {
        self.cart.iter().find(|line| line.id() == id)
    }

    #[must_use]
    pub fn is_cart_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        let currency = self
            .cart
            .first()
            .map_or(CurrencyCode::default(), |line| line.product.price.currency_code);
        Price::sum(currency, self.cart.iter().map(CartLineItem::line_total))
    }

    /// Total units across all lines (not the number of distinct lines).
    #[must_use]
    pub fn cart_item_count(&self) -> u32 {
        self.cart
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity.get()))
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Add the product if absent, remove it if present.
    pub fn toggle_wishlist(&mut self, product: ProductSnapshot) -> WishlistChange {
        if self.wishlist.remove(&product.id).is_some() {
            WishlistChange::Removed
        } else {
            self.wishlist.insert(product.id, product);
            WishlistChange::Added
        }
    }

    #[must_use]
    pub fn is_wishlisted(&self, id: ProductId) -> bool {
        self.wishlist.contains_key(&id)
    }

    /// The stored snapshot for `id`, if wishlisted.
    #[must_use]
    pub fn wishlist_entry(&self, id: ProductId) -> Option<&ProductSnapshot> {
        self.wishlist.get(&id)
    }

    /// Wishlisted products in ascending id order.
    pub fn wishlist(&self) -> impl Iterator<Item = &ProductSnapshot> {
        self.wishlist.values()
    }

    #[must_use]
    pub fn wishlist_len(&self) -> usize {
        self.wishlist.len()
    }

    // =========================================================================
    // Recently viewed
    // =========================================================================

    /// Record a product view.
    ///
    /// Already-present products are left where they are (no refresh to the
    /// front). Otherwise the product goes to the head, evicting the oldest
    /// entry when full. Returns whether the product was recorded.
    pub fn add_to_recently_viewed(&mut self, product: ProductSnapshot) -> bool {
        if self.recently_viewed.iter().any(|p| p.id == product.id) {
            return false;
        }
        if self.recently_viewed.len() >= RECENTLY_VIEWED_CAPACITY {
            self.recently_viewed.pop_back();
        }
        self.recently_viewed.push_front(product);
        true
    }

    /// Recently viewed products, newest first.
    pub fn recently_viewed(&self) -> impl Iterator<Item = &ProductSnapshot> {
        self.recently_viewed.iter()
    }
}
