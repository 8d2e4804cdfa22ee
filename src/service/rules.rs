//! Preconditions shared by every mutating cart operation.
//!
//! All checks run before the durable store is touched, so a rejected request
//! leaves no partial write behind.

use crate::error::{CartError, Result};
use crate::models::Cart;

/// Rejects a blank item id.
pub fn validate_item_id(item_id: &str) -> Result<()> {
    if item_id.trim().is_empty() {
        return Err(CartError::Validation("itemId is required".to_string()));
    }
    Ok(())
}

/// Accepts a quantity of at least one and narrows it to the stored width.
pub fn validate_quantity(quantity: i64) -> Result<u32> {
    if quantity < 1 {
        return Err(CartError::Validation(format!(
            "quantity must be at least 1, got {}",
            quantity
        )));
    }
    u32::try_from(quantity)
        .map_err(|_| CartError::Validation(format!("quantity {} is too large", quantity)))
}

/// A cart holds items from a single storefront. An empty cart accepts any.
pub fn ensure_single_storefront(cart: &Cart, item_id: &str, item_store: &str) -> Result<()> {
    match cart.store_id.as_deref() {
        Some(cart_store) if !cart.is_empty() && cart_store != item_store => {
            Err(CartError::Conflict {
                item_id: item_id.to_string(),
                cart_store: cart_store.to_string(),
                item_store: item_store.to_string(),
            })
        }
        _ => Ok(()),
    }
}
