//! Catalog product entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product in the store catalog.
///
/// Created, edited, and deleted by the admin role only; read by everyone.
/// The document id, like the `created_at` timestamp, is assigned by the
/// hosted backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Backend document id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Units in stock.
    pub stock: u32,
    /// Public URL of the product image.
    pub image_url: String,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product can currently be added to a cart.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(stock: u32) -> Product {
        Product {
            id: ProductId::new("p-1"),
            name: "Rice 5kg".to_owned(),
            price: Price::new(Decimal::new(2590, 2)),
            description: None,
            stock,
            image_url: "https://img.example/rice.jpg".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_in_stock() {
        assert!(product(1).in_stock());
        assert!(!product(0).in_stock());
    }

    #[test]
    fn test_deserialize_backend_document() {
        let json = r#"{
            "id": "p-9",
            "name": "Beans 1kg",
            "price": 8.5,
            "stock": 12,
            "image_url": "https://img.example/beans.jpg",
            "created_at": "2026-08-01T12:00:00Z"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Beans 1kg");
        assert_eq!(product.price, Price::new(Decimal::new(850, 2)));
        assert_eq!(product.description, None);
        assert_eq!(product.stock, 12);
    }
}
