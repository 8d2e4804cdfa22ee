//! Catalog Lookup
//!
//! Product metadata by id. Used to resolve an item's storefront on write and
//! to enrich responses; never consulted to validate stored cart state.

mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::ProductRecord;

pub use memory::MemoryCatalog;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to load catalog seed: {0}")]
    Seed(String),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

// == Catalog Trait ==
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetches a single product.
    async fn get(&self, item_id: &str) -> CatalogResult<Option<ProductRecord>>;

    /// Fetches many products in one round trip. Unknown ids are left out of
    /// the returned map.
    async fn batch_get(&self, item_ids: &[String]) -> CatalogResult<HashMap<String, ProductRecord>>;
}
