//! In-memory catalog, optionally seeded from a JSON file.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Catalog, CatalogError, CatalogResult};
use crate::models::ProductRecord;

#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<HashMap<String, ProductRecord>>,
    offline: AtomicBool,
    batch_requests: AtomicUsize,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the given products.
    pub fn with_products(products: impl IntoIterator<Item = ProductRecord>) -> Self {
        let products = products
            .into_iter()
            .map(|product| (product.item_id.clone(), product))
            .collect();

        Self {
            products: RwLock::new(products),
            ..Self::default()
        }
    }

    /// Loads a JSON array of product records.
    pub async fn from_json_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::Seed(format!("{}: {}", path.display(), e)))?;
        let products: Vec<ProductRecord> = serde_json::from_str(&raw)
            .map_err(|e| CatalogError::Seed(format!("{}: {}", path.display(), e)))?;

        Ok(Self::with_products(products))
    }

    /// Adds or replaces a product.
    pub async fn insert(&self, product: ProductRecord) {
        self.products
            .write()
            .await
            .insert(product.item_id.clone(), product);
    }

    /// Number of products held.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Makes every subsequent call fail with [`CatalogError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of `batch_get` calls served so far.
    pub fn batch_requests(&self) -> usize {
        self.batch_requests.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> CatalogResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(CatalogError::Unavailable("catalog is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn get(&self, item_id: &str) -> CatalogResult<Option<ProductRecord>> {
        self.check_online()?;
        Ok(self.products.read().await.get(item_id).cloned())
    }

    async fn batch_get(&self, item_ids: &[String]) -> CatalogResult<HashMap<String, ProductRecord>> {
        self.check_online()?;
        self.batch_requests.fetch_add(1, Ordering::SeqCst);

        let products = self.products.read().await;
        Ok(item_ids
            .iter()
            .filter_map(|id| products.get(id).map(|p| (id.clone(), p.clone())))
            .collect())
    }
}
