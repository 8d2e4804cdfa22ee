//! Catalog product record.

use serde::{Deserialize, Serialize};

/// Product metadata served by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub item_id: String,
    /// Storefront that sells the item
    pub store_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub available_quantity: u32,
}

impl ProductRecord {
    /// Creates a record with the required fields; the rest start empty.
    pub fn new(
        item_id: impl Into<String>,
        store_id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            store_id: store_id.into(),
            name: name.into(),
            price,
            image: String::new(),
            category: String::new(),
            description: String::new(),
            average_rating: 0.0,
            available_quantity: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{"itemId":"sku-1","storeId":"S1","name":"Mug","price":9.5}"#;
        let product: ProductRecord = serde_json::from_str(json).unwrap();

        assert_eq!(product, ProductRecord::new("sku-1", "S1", "Mug", 9.5));
    }
}
