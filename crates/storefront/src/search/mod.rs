//! In-memory product search over the catalog snapshot.
//!
//! The snapshot is loaded once by a background task after the catalog fetch
//! resolves (see [`crate::catalog::load_catalog_async`]). Until then the index
//! is loading and every search returns no results. If the fetch fails the
//! index is marked failed and keeps the user-facing message.
//!
//! Matching is a case-insensitive substring test of the query against a
//! product's title, description and category. Blank queries match nothing.
//! Results keep catalog order; there is no ranking.

mod debounce;

use std::sync::{Arc, RwLock};

use bazaar_core::{Product, ProductId};
use serde::Serialize;
use tracing::{info, instrument, warn};

pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};

/// Number of results shown in the instant-search dropdown.
pub const SUGGESTION_LIMIT: usize = 5;

/// Lifecycle of the catalog snapshot.
#[derive(Debug, Clone, Default)]
enum IndexState {
    #[default]
    Loading,
    Ready(Arc<[Product]>),
    /// The catalog fetch failed; holds the message shown to visitors.
    Failed(String),
}

/// The catalog snapshot searched by the storefront.
///
/// Cheaply cloneable; all clones share one snapshot.
#[derive(Clone, Default)]
pub struct SearchIndex {
    inner: Arc<RwLock<IndexState>>,
}

impl SearchIndex {
    /// Create a new empty search index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a snapshot has been loaded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.inner
            .read()
            .map(|state| matches!(*state, IndexState::Ready(_)))
            .unwrap_or(false)
    }

    /// Replace the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the index lock is poisoned.
    pub fn load(&self, products: Vec<Product>) -> Result<(), SearchError> {
        let count = products.len();
        *self.write()? = IndexState::Ready(products.into());

        info!(count, "Catalog snapshot loaded into search index");
        Ok(())
    }

    /// Record that the catalog could not be loaded.
    ///
    /// An already loaded snapshot is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the index lock is poisoned.
    pub fn mark_failed(&self, message: impl Into<String>) -> Result<(), SearchError> {
        let mut state = self.write()?;
        if matches!(*state, IndexState::Ready(_)) {
            warn!("Catalog reload failed; keeping the loaded snapshot");
            return Ok(());
        }
        *state = IndexState::Failed(message.into());
        Ok(())
    }

    /// The failure message, if the catalog fetch failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the index lock is poisoned.
    pub fn failure(&self) -> Result<Option<String>, SearchError> {
        Ok(match &*self.read()? {
            IndexState::Failed(message) => Some(message.clone()),
            IndexState::Loading | IndexState::Ready(_) => None,
        })
    }

    /// The current snapshot, if loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the index lock is poisoned.
    pub fn snapshot(&self) -> Result<Option<Arc<[Product]>>, SearchError> {
        Ok(match &*self.read()? {
            IndexState::Ready(products) => Some(Arc::clone(products)),
            IndexState::Loading | IndexState::Failed(_) => None,
        })
    }

    /// Find a product in the snapshot by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the index lock is poisoned.
    pub fn get(&self, id: ProductId) -> Result<Option<Product>, SearchError> {
        Ok(self
            .snapshot()?
            .and_then(|products| products.iter().find(|p| p.id == id).cloned()))
    }

    /// All products matching `query`, in catalog order.
    ///
    /// A blank query matches nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the index lock is poisoned.
    #[instrument(skip(self))]
    pub fn search(&self, query: &str) -> Result<Vec<Product>, SearchError> {
        Ok(self
            .snapshot()?
            .map(|products| filter_products(&products, query))
            .unwrap_or_default())
    }

    /// The first `limit` matches plus the total match count.
    ///
    /// # Errors
    ///
    /// Returns an error if the index lock is poisoned.
    pub fn suggest(&self, query: &str, limit: usize) -> Result<SearchResults, SearchError> {
        let mut products = self.search(query)?;
        let total = products.len();
        products.truncate(limit);
        Ok(SearchResults {
            query: query.to_string(),
            products,
            total,
        })
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, IndexState>, SearchError> {
        self.inner
            .read()
            .map_err(|_| SearchError::Index("Lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, IndexState>, SearchError> {
        self.inner
            .write()
            .map_err(|_| SearchError::Index("Lock poisoned".to_string()))
    }
}

/// Whether `product` matches an already lowercased, non-blank `needle`.
#[must_use]
pub fn matches(product: &Product, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);
    contains(&product.title)
        || product.description.as_deref().is_some_and(contains)
        || contains(&product.category)
}

/// Filter `products` by `query`, keeping their order.
///
/// Surrounding whitespace only decides blankness; it is otherwise part of
/// the needle.
#[must_use]
pub fn filter_products(products: &[Product], query: &str) -> Vec<Product> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| matches(p, &needle))
        .cloned()
        .collect()
}

/// A truncated result list with the full match count.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub products: Vec<Product>,
    /// Number of matches before truncation.
    pub total: usize,
}

impl SearchResults {
    /// Whether more matches exist than were returned.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.total > self.products.len()
    }
}

/// Search errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Index error: {0}")]
    Index(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bazaar_core::{Price, ProductId};
    use rust_decimal::Decimal;

    fn product(id: i32, title: &str, description: Option<&str>, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            description: description.map(String::from),
            category: category.to_string(),
            price: Price::usd(Decimal::ONE),
            discount_percentage: Decimal::ZERO,
            images: Vec::new(),
            rating: None,
        }
    }

    fn loaded() -> SearchIndex {
        let index = SearchIndex::new();
        index
            .load(vec![
                product(1, "Red Shoe", Some("Running shoe"), "footwear"),
                product(2, "Blue Hat", None, "hats"),
                product(3, "Red Hat", Some("Wool"), "hats"),
            ])
            .unwrap();
        index
    }

    fn ids(products: &[Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_search_red_keeps_order() {
        let results = loaded().search("red").unwrap();
        assert_eq!(ids(&results), [1, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        assert_eq!(ids(&loaded().search("RED").unwrap()), [1, 3]);
        assert_eq!(ids(&loaded().search("hAt").unwrap()), [2, 3]);
    }

    #[test]
    fn test_blank_query_is_empty() {
        let index = loaded();
        assert!(index.search("").unwrap().is_empty());
        assert!(index.search("   ").unwrap().is_empty());
        assert!(index.search("\t\n").unwrap().is_empty());
    }

    #[test]
    fn test_matches_description_and_category() {
        let index = loaded();
        assert_eq!(ids(&index.search("running").unwrap()), [1]);
        assert_eq!(ids(&index.search("footwear").unwrap()), [1]);
        assert_eq!(ids(&index.search("wool").unwrap()), [3]);
    }

    #[test]
    fn test_missing_description_does_not_match() {
        let p = product(2, "Blue Hat", None, "hats");
        assert!(!matches(&p, "wool"));
        assert!(matches(&p, "blue"));
    }

    #[test]
    fn test_not_ready_returns_empty() {
        let index = SearchIndex::new();
        assert!(!index.is_ready());
        assert!(index.search("red").unwrap().is_empty());
        assert!(index.snapshot().unwrap().is_none());
        assert!(index.failure().unwrap().is_none());
    }

    #[test]
    fn test_surrounding_whitespace_is_part_of_query() {
        let index = SearchIndex::new();
        index
            .load(vec![
                product(1, "Hatbox", None, "storage"),
                product(2, "Blue Hat", None, "hats"),
            ])
            .unwrap();

        assert_eq!(ids(&index.search(" hat").unwrap()), [2]);
        assert_eq!(ids(&index.search("hat").unwrap()), [1, 2]);
        assert!(index.search("hat ").unwrap().is_empty());
        assert_eq!(index.suggest(" hat", SUGGESTION_LIMIT).unwrap().query, " hat");
    }

    #[test]
    fn test_failed_load_is_reported() {
        let index = SearchIndex::new();
        index.mark_failed("catalog down").unwrap();

        assert!(!index.is_ready());
        assert_eq!(index.failure().unwrap().as_deref(), Some("catalog down"));
        assert!(index.search("red").unwrap().is_empty());

        // A later successful load clears the failure.
        index.load(vec![product(1, "Red Shoe", None, "x")]).unwrap();
        assert!(index.failure().unwrap().is_none());
        assert!(index.is_ready());
    }

    #[test]
    fn test_failure_keeps_loaded_snapshot() {
        let index = loaded();
        index.mark_failed("catalog down").unwrap();

        assert!(index.is_ready());
        assert!(index.failure().unwrap().is_none());
        assert_eq!(ids(&index.search("red").unwrap()), [1, 3]);
    }

    #[test]
    fn test_load_replaces_snapshot() {
        let index = loaded();
        assert!(index.is_ready());
        assert_eq!(index.snapshot().unwrap().unwrap().len(), 3);

        index.load(vec![product(9, "Green Scarf", None, "scarves")]).unwrap();
        assert_eq!(index.snapshot().unwrap().unwrap().len(), 1);
        assert!(index.search("red").unwrap().is_empty());
        assert_eq!(ids(&index.search("green").unwrap()), [9]);
    }

    #[test]
    fn test_clones_share_snapshot() {
        let index = SearchIndex::new();
        let clone = index.clone();
        index.load(vec![product(1, "Red Shoe", None, "x")]).unwrap();
        assert!(clone.is_ready());
        assert_eq!(clone.get(ProductId::new(1)).unwrap().unwrap().title, "Red Shoe");
        assert!(clone.get(ProductId::new(2)).unwrap().is_none());
    }

    #[test]
    fn test_suggest_truncates() {
        let index = SearchIndex::new();
        index
            .load((1..=8).map(|i| product(i, "Tee", None, "shirts")).collect())
            .unwrap();

        let results = index.suggest("tee", SUGGESTION_LIMIT).unwrap();
        assert_eq!(results.products.len(), 5);
        assert_eq!(results.total, 8);
        assert!(results.has_more());
        assert_eq!(results.query, "tee");
    }
}
