//! Wire records returned by the catalog API.

use bazaar_core::{Price, Product, ProductId, Rating};
use rust_decimal::Decimal;
use serde::Deserialize;

/// A product as served by the catalog API.
///
/// Accepts both the minimal shape (`image` only, numeric `price`, object
/// `rating`) and the richer one carrying `thumbnail`, `images` and
/// `discountPercentage`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub discount_percentage: Option<Decimal>,
    #[serde(default)]
    pub rating: Option<CatalogRating>,
}

/// Rating as either `{ "rate": 3.9, "count": 120 }` or a bare score.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum CatalogRating {
    Summary { rate: f64, count: u32 },
    Score(f64),
}

impl From<CatalogRating> for Rating {
    fn from(rating: CatalogRating) -> Self {
        match rating {
            CatalogRating::Summary { rate, count } => Self { rate, count },
            CatalogRating::Score(rate) => Self { rate, count: 0 },
        }
    }
}

impl From<CatalogProduct> for Product {
    fn from(wire: CatalogProduct) -> Self {
        // Thumbnail (or the single image) leads; the gallery follows.
        let gallery = if wire.images.is_empty() {
            wire.image.iter().cloned().collect()
        } else {
            wire.images
        };
        let mut images: Vec<String> = Vec::with_capacity(gallery.len() + 1);
        for url in wire.thumbnail.or(wire.image).into_iter().chain(gallery) {
            if !url.is_empty() && !images.contains(&url) {
                images.push(url);
            }
        }

        Self {
            id: wire.id,
            title: wire.title,
            description: wire.description,
            category: wire.category,
            price: Price::usd(wire.price),
            discount_percentage: wire.discount_percentage.unwrap_or(Decimal::ZERO),
            images,
            rating: wire.rating.map(Rating::from),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_shape() {
        let wire: CatalogProduct = serde_json::from_str(
            r#"{
                "id": 1,
                "title": "Fjallraven Backpack",
                "price": 109.95,
                "description": "Your perfect pack for everyday use",
                "category": "men's clothing",
                "image": "https://img.example/1.jpg",
                "rating": {"rate": 3.9, "count": 120}
            }"#,
        )
        .unwrap();
        let product = Product::from(wire);

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price.display(), "$109.95");
        assert_eq!(product.discount_percentage, Decimal::ZERO);
        assert_eq!(product.images, ["https://img.example/1.jpg"]);
        assert_eq!(product.thumbnail(), Some("https://img.example/1.jpg"));
        assert_eq!(product.rating.unwrap().count, 120);
        assert!(product.compare_at_price().is_none());
    }

    #[test]
    fn test_rich_shape() {
        let wire: CatalogProduct = serde_json::from_str(
            r#"{
                "id": 2,
                "title": "Mascara",
                "price": "9.99",
                "category": "beauty",
                "thumbnail": "https://img.example/thumb.jpg",
                "images": ["https://img.example/a.jpg", "https://img.example/thumb.jpg"],
                "discountPercentage": 20,
                "rating": 4.5
            }"#,
        )
        .unwrap();
        let product = Product::from(wire);

        assert_eq!(
            product.images,
            ["https://img.example/thumb.jpg", "https://img.example/a.jpg"]
        );
        assert!(product.description.is_none());
        assert_eq!(product.rating.unwrap().rate, 4.5);
        assert_eq!(product.rating.unwrap().count, 0);
        assert_eq!(product.compare_at_price().unwrap().display(), "$12.49");
    }

    #[test]
    fn test_no_images() {
        let wire: CatalogProduct =
            serde_json::from_str(r#"{"id": 3, "title": "Mystery", "price": 1}"#).unwrap();
        let product = Product::from(wire);
        assert!(product.images.is_empty());
        assert!(product.snapshot().image.is_none());
    }
}
