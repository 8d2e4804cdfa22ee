//! Cart Service
//!
//! Orchestrates the durable store, the snapshot cache, and the catalog.
//!
//! Reads go cache first and fall back to the store. Writes validate, read the
//! store (never the cache) for invariant checks, mutate the store, re-read it,
//! refresh the snapshot, and enrich. Concurrent writers for one user are not
//! serialized; the last durable write wins. A read that fills the cache after
//! a miss keeps its snapshot only if the store did not change meanwhile.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::{CartCache, SnapshotCache};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{CartError, Result};
use crate::models::{Cart, CartKey, CartLine, EnrichedCart};
use crate::service::enrich::enrich;
use crate::service::rules::{ensure_single_storefront, validate_item_id, validate_quantity};
use crate::store::CartStore;

// == Cart Service ==
#[derive(Clone)]
pub struct CartService {
    store: Arc<dyn CartStore>,
    catalog: Arc<dyn Catalog>,
    cache: SnapshotCache,
    /// Scopes are ignored when false
    scoped: bool,
    default_scope: String,
}

impl CartService {
    // == Constructor ==
    pub fn new(
        store: Arc<dyn CartStore>,
        cache: Arc<dyn CartCache>,
        catalog: Arc<dyn Catalog>,
        config: &Config,
    ) -> Self {
        Self {
            store,
            catalog,
            cache: SnapshotCache::new(cache, config.cache_ttl),
            scoped: config.scoped_carts(),
            default_scope: config.default_scope.clone(),
        }
    }

    /// Normalizes a key against the scope configuration.
    ///
    /// Without a configured scope key every cart is unscoped. With one, a
    /// missing scope falls back to the default scope.
    pub fn resolve_key(&self, key: &CartKey) -> CartKey {
        if !self.scoped {
            return CartKey::user(key.user_id.as_str());
        }
        match key.scope.as_deref().filter(|s| !s.is_empty()) {
            Some(scope) => CartKey::scoped(key.user_id.as_str(), scope),
            None => CartKey::scoped(key.user_id.as_str(), self.default_scope.as_str()),
        }
    }

    // == Get Cart ==
    /// Returns the enriched cart, preferring the cached snapshot.
    pub async fn get_cart(&self, key: &CartKey) -> Result<EnrichedCart> {
        let key = self.resolve_key(key);

        let cart = match self.cache.read_from_cache(&key).await {
            Some(cart) => cart,
            None => {
                let cart = self.fetch_cart(&key).await?;
                self.fill_cache(&key, &cart).await;
                cart
            }
        };

        Ok(enrich(self.catalog.as_ref(), cart).await)
    }

    /// Caches a cart read on a miss, unless a write landed meanwhile.
    ///
    /// A writer may commit and refresh the snapshot between our fetch and our
    /// set. Re-reading the store after the set catches that; on a difference
    /// the snapshot is dropped so the next read goes to the store. A failed
    /// re-read drops it too.
    async fn fill_cache(&self, key: &CartKey, cart: &Cart) {
        if !self.cache.write_to_cache(key, cart).await {
            return;
        }

        let partition = key.partition_key();
        match self.store.query_lines(&partition).await {
            Ok(current) if current == cart.items => {}
            Ok(_) => {
                debug!("Cart {} changed while filling the cache, dropping snapshot", partition);
                self.cache.invalidate_cache(key).await;
            }
            Err(e) => {
                warn!("Could not confirm snapshot for cart {}: {}", partition, e);
                self.cache.invalidate_cache(key).await;
            }
        }
    }

    // == Add Item ==
    /// Sets an item's quantity, inserting the line if needed.
    pub async fn add_item(&self, key: &CartKey, item_id: &str, quantity: i64) -> Result<EnrichedCart> {
        validate_item_id(item_id)?;
        let quantity = validate_quantity(quantity)?;

        self.upsert_line(&self.resolve_key(key), item_id, quantity).await
    }

    // == Update Item Quantity ==
    /// Like [`CartService::add_item`], except a quantity below one removes the line.
    pub async fn update_item_quantity(
        &self,
        key: &CartKey,
        item_id: &str,
        quantity: i64,
    ) -> Result<EnrichedCart> {
        validate_item_id(item_id)?;
        if quantity < 1 {
            debug!("Quantity {} for {}, removing line", quantity, item_id);
            return self.remove_item(key, item_id).await;
        }
        let quantity = validate_quantity(quantity)?;

        self.upsert_line(&self.resolve_key(key), item_id, quantity).await
    }

    // == Remove Item ==
    /// Deletes a line. Removing an absent line is not an error.
    pub async fn remove_item(&self, key: &CartKey, item_id: &str) -> Result<EnrichedCart> {
        validate_item_id(item_id)?;
        let key = self.resolve_key(key);

        self.store
            .delete_line(&key.partition_key(), item_id)
            .await?;
        info!("Removed {} from cart {}", item_id, key.partition_key());

        self.refresh(&key).await
    }

    // == Clear Cart ==
    /// Deletes every line and leaves an empty snapshot behind.
    pub async fn clear_cart(&self, key: &CartKey) -> Result<EnrichedCart> {
        let key = self.resolve_key(key);
        let partition = key.partition_key();

        let current = self.fetch_cart(&key).await?;
        let item_ids = current.item_ids();
        self.store.batch_delete_lines(&partition, &item_ids).await?;
        info!("Cleared {} lines from cart {}", item_ids.len(), partition);

        let cart = Cart::empty(key.user_id.as_str());
        self.cache.refresh(&key, &cart).await;

        Ok(enrich(self.catalog.as_ref(), cart).await)
    }

    // == Durable Fetch ==
    /// Reads the cart straight from the durable store.
    pub async fn fetch_cart(&self, key: &CartKey) -> Result<Cart> {
        let lines = self.store.query_lines(&key.partition_key()).await?;
        Ok(Cart::from_lines(key.user_id.as_str(), lines))
    }

    /// Shared write path for add and update.
    async fn upsert_line(&self, key: &CartKey, item_id: &str, quantity: u32) -> Result<EnrichedCart> {
        let product = self
            .catalog
            .get(item_id)
            .await?
            .ok_or_else(|| CartError::NotFound(item_id.to_string()))?;

        let current = self.fetch_cart(key).await?;
        ensure_single_storefront(&current, item_id, &product.store_id)?;

        let line = CartLine::new(key.user_id.as_str(), item_id, product.store_id, quantity);
        self.store.put_line(&key.partition_key(), line).await?;
        info!(
            "Set {} x{} in cart {}",
            item_id,
            quantity,
            key.partition_key()
        );

        self.refresh(key).await
    }

    /// Re-reads the store after a write, refreshes the snapshot, and enriches.
    async fn refresh(&self, key: &CartKey) -> Result<EnrichedCart> {
        let cart = self.fetch_cart(key).await?;

        // Two first-adds racing on an empty cart can both pass the storefront
        // check; surface it rather than hide it.
        let storefronts = cart.storefronts();
        if storefronts.len() > 1 {
            warn!(
                "Cart {} holds lines from several storefronts: {:?}",
                key.partition_key(),
                storefronts
            );
        }

        self.cache.refresh(key, &cart).await;
        Ok(enrich(self.catalog.as_ref(), cart).await)
    }
}
