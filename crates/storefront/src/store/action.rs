//! Messages accepted by [`Store::dispatch`](super::Store::dispatch).

use bazaar_core::{ProductId, ProductSnapshot, Quantity};
use serde::{Deserialize, Serialize};

/// A state transition request for the store.
///
/// Quantities are carried raw so that validation happens in exactly one
/// place, when the store applies the action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StoreAction {
    /// Add units of a product, merging into an existing line.
    AddToCart {
        item: ProductSnapshot,
        /// Defaults to one unit.
        #[serde(default)]
        quantity: Option<i64>,
    },
    RemoveFromCart {
        id: ProductId,
    },
    /// Set the quantity of an existing line.
    UpdateQuantity {
        id: ProductId,
        quantity: i64,
    },
    ClearCart,
    ToggleWishlist {
        product: ProductSnapshot,
    },
    AddToRecentlyViewed {
        product: ProductSnapshot,
    },
}

impl StoreAction {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddToCart { .. } => "add_to_cart",
            Self::RemoveFromCart { .. } => "remove_from_cart",
            Self::UpdateQuantity { .. } => "update_quantity",
            Self::ClearCart => "clear_cart",
            Self::ToggleWishlist { .. } => "toggle_wishlist",
            Self::AddToRecentlyViewed { .. } => "add_to_recently_viewed",
        }
    }
}

/// Whether a wishlist toggle added or removed the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WishlistChange {
    Added,
    Removed,
}

/// What a dispatched action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The line for `id` now holds `quantity` units.
    CartLine { id: ProductId, quantity: Quantity },
    /// `true` when a line was removed, `false` for a no-op.
    Removed(bool),
    /// `true` when a line was updated, `false` for a no-op.
    Updated(bool),
    Cleared,
    Wishlist(WishlistChange),
    /// `true` when the product was recorded, `false` when already present.
    Viewed(bool),
}
