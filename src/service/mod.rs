//! Cart Service Module
//!
//! Business logic over the durable store, the snapshot cache, and the catalog.

mod cart_service;
mod enrich;
mod rules;

#[cfg(test)]
mod property_tests;

pub use cart_service::CartService;
pub use enrich::enrich;
pub use rules::{ensure_single_storefront, validate_item_id, validate_quantity};
