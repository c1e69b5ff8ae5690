//! Cart line items.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;
use crate::types::product::ProductSnapshot;
use crate::types::quantity::Quantity;

/// One product in the cart and how many units of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: ProductSnapshot,
    pub quantity: Quantity,
}

impl CartLineItem {
    /// Create a line item.
    #[must_use]
    pub const fn new(product: ProductSnapshot, quantity: Quantity) -> Self {
        Self { product, quantity }
    }

    /// The product this line is for.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let line = CartLineItem::new(
            ProductSnapshot {
                id: ProductId::new(4),
                title: "Mug".to_string(),
                price: Price::usd("2.50".parse().unwrap()),
                category: "kitchen".to_string(),
                image: None,
            },
            Quantity::new(4).unwrap(),
        );
        assert_eq!(line.id(), ProductId::new(4));
        assert_eq!(line.line_total().display(), "$10.00");
    }

    #[test]
    fn test_serializes_flat() {
        let line = CartLineItem::new(
            ProductSnapshot {
                id: ProductId::new(1),
                title: "Hat".to_string(),
                price: Price::usd("5".parse().unwrap()),
                category: "hats".to_string(),
                image: Some("hat.png".to_string()),
            },
            Quantity::ONE,
        );
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["quantity"], 1);

        let back: CartLineItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, line);
    }
}
