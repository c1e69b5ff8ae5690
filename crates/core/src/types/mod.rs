//! Core types for Bazaar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod quantity;
pub mod status;

pub use cart::CartLineItem;
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::{Product, ProductSnapshot, Rating};
pub use quantity::{Quantity, QuantityError};
pub use status::*;
