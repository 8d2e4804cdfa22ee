//! Error types for the cart service
//!
//! Provides the service-level error taxonomy using thiserror and maps it onto
//! HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::catalog::CatalogError;
use crate::models::ErrorResponse;
use crate::store::StoreError;

// == Cart Error Enum ==
/// Every failure a cart operation can surface. Cache failures are absent on
/// purpose: they never leave the snapshot cache helper.
#[derive(Error, Debug)]
pub enum CartError {
    /// Missing or malformed input
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Referenced item does not exist in the catalog
    #[error("Item not found: {0}")]
    NotFound(String),

    /// Adding the item would mix storefronts in one cart
    #[error("Cart already holds items from store '{cart_store}', item '{item_id}' belongs to store '{item_store}'")]
    Conflict {
        item_id: String,
        cart_store: String,
        item_store: String,
    },

    /// Durable store key shape differs from the row layout this service writes
    #[error("Cart table key schema mismatch: expected {expected}, found {actual}")]
    SchemaMismatch {
        expected: String,
        actual: String,
        hint: String,
    },

    /// Any other durable store or catalog failure
    #[error("Backing service failure: {0}")]
    TransientStore(String),
}

// == Collaborator Conversions ==
impl From<StoreError> for CartError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SchemaMismatch { expected, actual } => CartError::SchemaMismatch {
                hint: format!(
                    "the cart table must be keyed by {expected}; check the table definition deployed for this environment"
                ),
                expected: expected.to_string(),
                actual: actual.to_string(),
            },
            other => CartError::TransientStore(other.to_string()),
        }
    }
}

impl From<CatalogError> for CartError {
    fn from(err: CatalogError) -> Self {
        CartError::TransientStore(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            CartError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorResponse::new(message)),
            CartError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorResponse::new(message)),
            CartError::Conflict { .. } => (StatusCode::CONFLICT, ErrorResponse::new(message)),
            CartError::SchemaMismatch { hint, .. } => {
                error!("{} ({})", message, hint);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_hint(message, hint),
                )
            }
            CartError::TransientStore(_) => {
                error!("{}", message);
                (StatusCode::SERVICE_UNAVAILABLE, ErrorResponse::new(message))
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cart operations.
pub type Result<T> = std::result::Result<T, CartError>;
