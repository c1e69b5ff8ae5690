//! Bazaar storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused by the CLI.
//!
//! - [`store`]: per-visitor cart, wishlist and recently viewed state
//! - [`search`]: catalog snapshot, substring search and input debouncing
//! - [`catalog`]: HTTP client for the remote product catalog
//! - [`checkout`]: simulated three-step checkout
//! - [`routes`]: the JSON API

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod search;
pub mod state;
pub mod store;
