//! CLI subcommands.

pub mod catalog;
pub mod search;

use bazaar_core::Product;
use bazaar_storefront::catalog::{CatalogClient, CatalogError};
use bazaar_storefront::config::{CatalogConfig, ConfigError};
use bazaar_storefront::search::SearchError;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog API request failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Search index failure.
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Reading stdin failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One line per product: id, price, title and category.
fn product_line(product: &Product) -> String {
    format!(
        "{:>5}  {:>10}  {} [{}]",
        product.id,
        product.price.display(),
        product.title,
        product.category
    )
}

/// Catalog client configured from the environment.
fn client() -> Result<CatalogClient, CliError> {
    let client = CatalogClient::new(&CatalogConfig::from_env()?);
    info!(api_url = %client.base_url(), "Using catalog API");
    Ok(client)
}
