//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::search::SearchIndex;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog client, the search snapshot and configuration. Per-visitor state
/// lives in the session, not here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    search: SearchIndex,
}

impl AppState {
    /// Create a new application state with an empty search index.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = CatalogClient::new(&config.catalog);
        Self::with_index(config, catalog, SearchIndex::new())
    }

    /// Create application state around an existing client and index.
    #[must_use]
    pub fn with_index(config: StorefrontConfig, catalog: CatalogClient, search: SearchIndex) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                search,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the catalog search snapshot.
    #[must_use]
    pub fn search(&self) -> &SearchIndex {
        &self.inner.search
    }
}
