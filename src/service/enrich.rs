//! Response enrichment with live catalog data.

use std::collections::HashMap;

use tracing::warn;

use crate::catalog::Catalog;
use crate::models::{Cart, EnrichedCart, EnrichedCartLine, ProductRecord};

/// Merges every line with its catalog record in one batch lookup.
///
/// Never fails: a catalog outage or a missing record yields default display
/// fields for the affected lines. Empty carts skip the lookup.
pub async fn enrich(catalog: &dyn Catalog, cart: Cart) -> EnrichedCart {
    let products: HashMap<String, ProductRecord> = if cart.is_empty() {
        HashMap::new()
    } else {
        let item_ids = cart.item_ids();
        match catalog.batch_get(&item_ids).await {
            Ok(products) => {
                if products.len() < item_ids.len() {
                    warn!(
                        "Catalog returned {} of {} items for cart {}",
                        products.len(),
                        item_ids.len(),
                        cart.user_id
                    );
                }
                products
            }
            Err(e) => {
                warn!("Catalog lookup failed for cart {}, using defaults: {}", cart.user_id, e);
                HashMap::new()
            }
        }
    };

    let items = cart
        .items
        .into_iter()
        .map(|line| {
            let product = products.get(&line.item_id);
            EnrichedCartLine::merge(line, product)
        })
        .collect();

    EnrichedCart {
        user_id: cart.user_id,
        store_id: cart.store_id,
        items,
        updated_at: cart.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::models::cart::UNKNOWN_ITEM_NAME;
    use crate::models::{CartLine, ProductRecord};

    #[tokio::test]
    async fn test_empty_cart_skips_catalog() {
        let catalog = MemoryCatalog::new();

        let enriched = enrich(&catalog, Cart::empty("u1")).await;

        assert!(enriched.is_empty());
        assert_eq!(catalog.batch_requests(), 0);
    }

    #[tokio::test]
    async fn test_merges_catalog_fields() {
        let mut mug = ProductRecord::new("sku-1", "S1", "Mug", 9.5);
        mug.available_quantity = 7;
        let catalog = MemoryCatalog::with_products([mug]);
        let cart = Cart::from_lines(
            "u1",
            vec![
                CartLine::new("u1", "sku-1", "S1", 2),
                CartLine::new("u1", "sku-gone", "S1", 1),
            ],
        );

        let enriched = enrich(&catalog, cart).await;

        let mug = enriched.line("sku-1").unwrap();
        assert_eq!(mug.name, "Mug");
        assert_eq!(mug.price, 9.5);
        assert_eq!(mug.available_quantity, 7);
        assert_eq!(enriched.line("sku-gone").unwrap().name, UNKNOWN_ITEM_NAME);
        assert_eq!(catalog.batch_requests(), 1);
    }

    #[tokio::test]
    async fn test_catalog_outage_uses_defaults() {
        let catalog = MemoryCatalog::with_products([ProductRecord::new("sku-1", "S1", "Mug", 9.5)]);
        catalog.set_offline(true);
        let cart = Cart::from_lines("u1", vec![CartLine::new("u1", "sku-1", "S1", 2)]);

        let enriched = enrich(&catalog, cart).await;

        assert_eq!(enriched.store_id.as_deref(), Some("S1"));
        assert_eq!(enriched.items[0].name, UNKNOWN_ITEM_NAME);
        assert_eq!(enriched.items[0].line.quantity, 2);
    }
}
