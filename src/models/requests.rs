//! Request DTOs for the cart API
//!
//! Missing fields deserialize to empty values so the service reports them as
//! validation errors instead of the framework rejecting the body.

use serde::Deserialize;

/// Request body for `POST /cart/items`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub quantity: i64,
}

/// Request body for `PUT /cart/items/:item_id`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQuantityRequest {
    /// New quantity; zero or less removes the line
    #[serde(default)]
    pub quantity: i64,
}
