//! Product record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use compras_core::{Price, ProductId};

/// A catalog product as stored in the `PRODUTOS` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Absent on rows created before the column existed.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert/update payload for a product.
///
/// Updates carry the same shape and are scoped by the target product's id at
/// the query level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_created_at() {
        // Older rows (and the list query) may omit created_at.
        let json = r#"{"id": 1, "name": "Shirt", "description": "Cotton", "price": "49.90"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Price::parse("49.90").unwrap());
        assert!(product.created_at.is_none());
    }

    #[test]
    fn test_deserialize_with_created_at() {
        let json = r#"{
            "id": 2,
            "name": "Mug",
            "description": "Ceramic",
            "price": "12.50",
            "created_at": "2025-06-19T18:00:00+00:00"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.created_at.is_some());
    }
}
