//! Property-Based Tests for the Cart Service
//!
//! Uses proptest to check the cart invariants across arbitrary inputs, with
//! tokio-test driving the async service from synchronous property bodies.

use std::sync::Arc;

use async_trait::async_trait;
use proptest::prelude::*;

use crate::cache::{CacheFailure, CartCache, MemoryCache};
use crate::catalog::MemoryCatalog;
use crate::config::Config;
use crate::error::CartError;
use crate::models::{CartKey, CartLine, EnrichedCart, ProductRecord};
use crate::service::CartService;
use crate::store::{CartStore, MemoryCartStore, BATCH_WRITE_LIMIT};

// == Test Doubles ==
/// A cache whose every call fails, as if the server were unreachable.
struct UnreachableCache;

#[async_trait]
impl CartCache for UnreachableCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheFailure> {
        Err(CacheFailure::Unavailable("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: u64) -> Result<(), CacheFailure> {
        Err(CacheFailure::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheFailure> {
        Err(CacheFailure::Unavailable("connection refused".to_string()))
    }
}

// == Fixtures ==
const STOREFRONTS: [&str; 3] = ["S1", "S2", "S3"];

/// Catalog of `item-<store>-<n>` products, ten per storefront.
fn catalog() -> Arc<MemoryCatalog> {
    let products = STOREFRONTS.iter().flat_map(|store| {
        (0..10).map(move |n| ProductRecord::new(format!("item-{store}-{n}"), *store, "Item", 1.0))
    });
    Arc::new(MemoryCatalog::with_products(products))
}

fn service_with(cache: Arc<dyn CartCache>) -> (CartService, Arc<MemoryCartStore>) {
    let store = Arc::new(MemoryCartStore::new());
    let service = CartService::new(store.clone(), cache, catalog(), &Config::default());
    (service, store)
}

fn service() -> (CartService, Arc<MemoryCartStore>) {
    service_with(Arc::new(MemoryCache::new(1000)))
}

fn item_id(store: usize, n: usize) -> String {
    format!("item-{}-{}", STOREFRONTS[store], n)
}

/// Comparable view of a cart: storefront plus sorted (item, quantity) pairs.
fn shape(cart: &EnrichedCart) -> (Option<String>, Vec<(String, u32)>) {
    let mut lines: Vec<(String, u32)> = cart
        .items
        .iter()
        .map(|item| (item.line.item_id.clone(), item.line.quantity))
        .collect();
    lines.sort();
    (cart.store_id.clone(), lines)
}

// == Strategies ==
fn user_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,16}"
}

#[derive(Debug, Clone)]
enum CartOp {
    Add { store: usize, n: usize, quantity: i64 },
    Update { store: usize, n: usize, quantity: i64 },
    Remove { store: usize, n: usize },
    Clear,
    Get,
}

fn cart_op_strategy() -> impl Strategy<Value = CartOp> {
    prop_oneof![
        4 => (0..3usize, 0..10usize, 1..20i64)
            .prop_map(|(store, n, quantity)| CartOp::Add { store, n, quantity }),
        2 => (0..3usize, 0..10usize, -2..20i64)
            .prop_map(|(store, n, quantity)| CartOp::Update { store, n, quantity }),
        2 => (0..3usize, 0..10usize).prop_map(|(store, n)| CartOp::Remove { store, n }),
        1 => Just(CartOp::Clear),
        2 => Just(CartOp::Get),
    ]
}

async fn apply(service: &CartService, key: &CartKey, op: &CartOp) -> Result<EnrichedCart, String> {
    let result = match op {
        CartOp::Add { store, n, quantity } => {
            service.add_item(key, &item_id(*store, *n), *quantity).await
        }
        CartOp::Update { store, n, quantity } => {
            service
                .update_item_quantity(key, &item_id(*store, *n), *quantity)
                .await
        }
        CartOp::Remove { store, n } => service.remove_item(key, &item_id(*store, *n)).await,
        CartOp::Clear => service.clear_cart(key).await,
        CartOp::Get => service.get_cart(key).await,
    };
    result.map_err(|e| e.to_string())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Adding an item and reading the cart back shows that item and quantity.
    #[test]
    fn prop_add_then_get(user in user_strategy(), store in 0..3usize, n in 0..10usize, quantity in 1..1000i64) {
        let (service, _) = service();
        let key = CartKey::user(user);

        let cart = tokio_test::block_on(async {
            service.add_item(&key, &item_id(store, n), quantity).await.unwrap();
            service.get_cart(&key).await.unwrap()
        });

        let line = cart.line(&item_id(store, n)).map(|l| l.line.quantity);
        prop_assert_eq!(line, Some(quantity as u32));
        prop_assert_eq!(cart.store_id.as_deref(), Some(STOREFRONTS[store]));
    }

    // A cart holding storefront A rejects items from storefront B and stays as it was.
    #[test]
    fn prop_foreign_storefront_conflicts(
        user in user_strategy(),
        first in 0..3usize,
        offset in 1..3usize,
        n in 0..10usize,
        m in 0..10usize,
    ) {
        let (service, _) = service();
        let key = CartKey::user(user);
        let other = (first + offset) % STOREFRONTS.len();

        let (result, before, after) = tokio_test::block_on(async {
            service.add_item(&key, &item_id(first, n), 3).await.unwrap();
            let before = service.fetch_cart(&key).await.unwrap();
            let result = service.add_item(&key, &item_id(other, m), 1).await;
            let after = service.fetch_cart(&key).await.unwrap();
            (result, before, after)
        });

        let is_conflict = matches!(result, Err(CartError::Conflict { .. }));
        prop_assert!(is_conflict);
        prop_assert_eq!(before, after);
    }

    // Every line of a cart built through the service shares the cart's storefront.
    #[test]
    fn prop_single_storefront_holds(user in user_strategy(), ops in prop::collection::vec(cart_op_strategy(), 1..40)) {
        let (service, _) = service();
        let key = CartKey::user(user);

        let cart = tokio_test::block_on(async {
            for op in &ops {
                let _ = apply(&service, &key, op).await;
            }
            service.get_cart(&key).await.unwrap()
        });

        for item in &cart.items {
            prop_assert_eq!(Some(item.line.store_id.as_str()), cart.store_id.as_deref());
            prop_assert!(item.line.quantity >= 1);
        }
        prop_assert_eq!(cart.is_empty(), cart.store_id.is_none());
    }

    // Clearing always leaves an empty, unconstrained cart, whatever its size.
    #[test]
    fn prop_clear_empties(user in user_strategy(), lines in 0..(BATCH_WRITE_LIMIT * 3)) {
        let (service, store) = service();
        let key = CartKey::user(user);

        let cart = tokio_test::block_on(async {
            for n in 0..lines {
                // Only ten catalog items per store, so spill into raw rows
                let line = CartLine::new(key.user_id.as_str(), format!("raw-{n}"), "S1", 1);
                store.put_line(&key.partition_key(), line).await.unwrap();
            }
            service.clear_cart(&key).await.unwrap();
            service.get_cart(&key).await.unwrap()
        });

        prop_assert!(cart.is_empty());
        prop_assert!(cart.store_id.is_none());
        prop_assert_eq!(store.batch_requests(), lines.div_ceil(BATCH_WRITE_LIMIT));
    }

    // An unreachable cache changes nothing a caller can observe.
    #[test]
    fn prop_cache_outage_is_invisible(user in user_strategy(), ops in prop::collection::vec(cart_op_strategy(), 1..30)) {
        let (healthy, _) = service();
        let (degraded, _) = service_with(Arc::new(UnreachableCache));
        let key = CartKey::user(user);

        let (expected, actual) = tokio_test::block_on(async {
            let mut expected = Vec::new();
            let mut actual = Vec::new();
            for op in &ops {
                expected.push(apply(&healthy, &key, op).await.map(|c| shape(&c)));
                actual.push(apply(&degraded, &key, op).await.map(|c| shape(&c)));
            }
            (expected, actual)
        });

        prop_assert_eq!(expected, actual);
    }
}
