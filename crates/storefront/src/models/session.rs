//! Session-related types.
//!
//! Visitor state is stored in the session as JSON under these keys: the
//! [`Store`](crate::store::Store) and the
//! [`CheckoutFlow`](crate::checkout::CheckoutFlow).

/// Session keys for visitor data.
pub mod keys {
    /// Key for the visitor's cart, wishlist and recently viewed products.
    pub const STORE: &str = "store";

    /// Key for the visitor's checkout progress.
    pub const CHECKOUT: &str = "checkout";
}
