//! Remote product catalog.
//!
//! # Architecture
//!
//! - The catalog API owns products; the storefront never writes to it
//! - `reqwest` for HTTP, `moka` for response caching
//! - One background fetch at startup fills the [`SearchIndex`] snapshot
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//! let products = client.get_products().await?;
//! let categories = client.get_categories().await?;
//! ```

mod cache;
mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::{CatalogProduct, CatalogRating};

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::search::{SearchError, SearchIndex};

/// Message shown to visitors when the catalog cannot be fetched.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products. Please try again later.";

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Catalog API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The configured base URL cannot carry a path.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// The fetched snapshot could not be stored.
    #[error("Search index error: {0}")]
    Index(#[from] SearchError),
}

/// Spawn a background task that loads the catalog into `index`.
///
/// Until it completes, searches return no results and `/health/ready`
/// reports not ready. A failed fetch is logged and marks the index failed
/// with [`LOAD_FAILED_MESSAGE`], which search responses then carry.
pub fn load_catalog_async(index: SearchIndex, client: CatalogClient) -> JoinHandle<()> {
    info!("Spawning background catalog load task");
    tokio::spawn(async move {
        match load_catalog(&index, &client).await {
            Ok(count) => info!(count, "Search index is now ready and serving requests"),
            Err(e) => {
                error!(error = %e, "{LOAD_FAILED_MESSAGE}");
                if let Err(e) = index.mark_failed(LOAD_FAILED_MESSAGE) {
                    error!(error = %e, "Failed to record catalog load failure");
                }
            }
        }
    })
}

/// Fetch every product and load the snapshot into `index`.
///
/// # Errors
///
/// Returns an error if the fetch fails or the index cannot be written.
#[instrument(skip_all)]
pub async fn load_catalog(index: &SearchIndex, client: &CatalogClient) -> Result<usize, CatalogError> {
    let products = client.get_products().await?;
    let count = products.len();
    index.load(products)?;
    Ok(count)
}
