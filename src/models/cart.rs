//! Cart Models
//!
//! Durable cart lines, the per-user cart aggregate, and the enriched
//! projection returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ProductRecord;

// == Cart Key ==
/// Identifies one cart: a user, optionally narrowed by a scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartKey {
    /// Owning user
    pub user_id: String,
    /// Secondary key component for multi-scope carts
    pub scope: Option<String>,
}

impl CartKey {
    /// Creates an unscoped key for a user.
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            scope: None,
        }
    }

    /// Creates a key for a user within a scope.
    pub fn scoped(user_id: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            scope: Some(scope.into()),
        }
    }

    /// Partition key value used by the durable store.
    pub fn partition_key(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{}#{}", self.user_id, scope),
            None => self.user_id.clone(),
        }
    }

    /// Key under which the cart snapshot is cached.
    pub fn cache_key(&self) -> String {
        format!("cart:{}", self.partition_key())
    }
}

// == Cart Line ==
/// One durable row: a single item in a user's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub user_id: String,
    pub item_id: String,
    /// Storefront that owns the item
    pub store_id: String,
    /// Always >= 1; a line reduced to zero is deleted instead
    pub quantity: u32,
    pub updated_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a line stamped with the current time.
    pub fn new(
        user_id: impl Into<String>,
        item_id: impl Into<String>,
        store_id: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            item_id: item_id.into(),
            store_id: store_id.into(),
            quantity,
            updated_at: Utc::now(),
        }
    }
}

// == Cart ==
/// The cart aggregate for one user. Also the exact shape of the cached snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user_id: String,
    /// Storefront constraining every line, `None` when the cart is empty
    pub store_id: Option<String>,
    pub items: Vec<CartLine>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            store_id: None,
            items: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Builds the aggregate from durable rows.
    ///
    /// The storefront is taken from the first line; the durable store does not
    /// guarantee the lines agree, see [`Cart::storefronts`].
    pub fn from_lines(user_id: impl Into<String>, items: Vec<CartLine>) -> Self {
        let store_id = items.first().map(|line| line.store_id.clone());
        let updated_at = items
            .iter()
            .map(|line| line.updated_at)
            .max()
            .unwrap_or_else(Utc::now);

        Self {
            user_id: user_id.into(),
            store_id,
            items,
            updated_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a line by item id.
    pub fn line(&self, item_id: &str) -> Option<&CartLine> {
        self.items.iter().find(|line| line.item_id == item_id)
    }

    /// Distinct storefronts referenced by the lines, sorted.
    pub fn storefronts(&self) -> Vec<&str> {
        let mut stores: Vec<&str> = self.items.iter().map(|l| l.store_id.as_str()).collect();
        stores.sort_unstable();
        stores.dedup();
        stores
    }

    /// Distinct item ids, in line order.
    pub fn item_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::with_capacity(self.items.len());
        for line in &self.items {
            if !ids.contains(&line.item_id) {
                ids.push(line.item_id.clone());
            }
        }
        ids
    }
}

// == Enriched Cart Line ==
/// A cart line merged with live catalog data. Response only, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedCartLine {
    #[serde(flatten)]
    pub line: CartLine,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    pub description: String,
    pub average_rating: f64,
    pub available_quantity: u32,
}

/// Name shown when the catalog has no record for a line.
pub const UNKNOWN_ITEM_NAME: &str = "Unknown item";

/// Image shown when the catalog has no record for a line.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.png";

impl EnrichedCartLine {
    /// Merges a line with its catalog record, falling back to defaults.
    pub fn merge(line: CartLine, product: Option<&ProductRecord>) -> Self {
        match product {
            Some(product) => Self {
                line,
                name: product.name.clone(),
                price: product.price,
                image: product.image.clone(),
                category: product.category.clone(),
                description: product.description.clone(),
                average_rating: product.average_rating,
                available_quantity: product.available_quantity,
            },
            None => Self {
                line,
                name: UNKNOWN_ITEM_NAME.to_string(),
                price: 0.0,
                image: PLACEHOLDER_IMAGE.to_string(),
                category: String::new(),
                description: String::new(),
                average_rating: 0.0,
                available_quantity: 0,
            },
        }
    }
}

// == Enriched Cart ==
/// Response shape handed to the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedCart {
    pub user_id: String,
    pub store_id: Option<String>,
    pub items: Vec<EnrichedCartLine>,
    pub updated_at: DateTime<Utc>,
}

impl EnrichedCart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an enriched line by item id.
    pub fn line(&self, item_id: &str) -> Option<&EnrichedCartLine> {
        self.items.iter().find(|item| item.line.item_id == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_key_partition() {
        assert_eq!(CartKey::user("u1").partition_key(), "u1");
        assert_eq!(CartKey::scoped("u1", "web").partition_key(), "u1#web");
        assert_eq!(CartKey::scoped("u1", "web").cache_key(), "cart:u1#web");
    }

    #[test]
    fn test_from_lines_empty() {
        let cart = Cart::from_lines("u1", Vec::new());
        assert!(cart.is_empty());
        assert!(cart.store_id.is_none());
    }

    #[test]
    fn test_from_lines_takes_first_store() {
        let lines = vec![
            CartLine::new("u1", "sku-1", "S1", 2),
            CartLine::new("u1", "sku-2", "S1", 1),
        ];
        let cart = Cart::from_lines("u1", lines);

        assert_eq!(cart.store_id.as_deref(), Some("S1"));
        assert_eq!(cart.line("sku-2").map(|l| l.quantity), Some(1));
        assert_eq!(cart.storefronts(), vec!["S1"]);
    }

    #[test]
    fn test_storefronts_reports_mixed_rows() {
        let lines = vec![
            CartLine::new("u1", "sku-1", "S2", 1),
            CartLine::new("u1", "sku-2", "S1", 1),
        ];
        let cart = Cart::from_lines("u1", lines);
        assert_eq!(cart.storefronts(), vec!["S1", "S2"]);
    }

    #[test]
    fn test_snapshot_uses_camel_case() {
        let cart = Cart::from_lines("u1", vec![CartLine::new("u1", "sku-1", "S1", 2)]);
        let json = serde_json::to_value(&cart).unwrap();

        assert_eq!(json["storeId"], "S1");
        assert_eq!(json["items"][0]["itemId"], "sku-1");

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_merge_without_product_uses_defaults() {
        let enriched = EnrichedCartLine::merge(CartLine::new("u1", "gone", "S1", 3), None);

        assert_eq!(enriched.name, UNKNOWN_ITEM_NAME);
        assert_eq!(enriched.price, 0.0);
        assert_eq!(enriched.image, PLACEHOLDER_IMAGE);
        assert_eq!(enriched.line.quantity, 3);
    }

    #[test]
    fn test_enriched_line_flattens() {
        let enriched = EnrichedCartLine::merge(CartLine::new("u1", "sku-1", "S1", 1), None);
        let json = serde_json::to_value(&enriched).unwrap();

        assert_eq!(json["itemId"], "sku-1");
        assert_eq!(json["availableQuantity"], 0);
    }
}
