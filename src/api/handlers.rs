//! API Handlers
//!
//! Thin HTTP adapters over [`CartService`]. The caller's identity comes from
//! the `x-user-id` header; authenticating it is the job of whatever sits in
//! front of this service.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, State},
    http::request::Parts,
    Json,
};

use crate::cache::MemoryCache;
use crate::catalog::MemoryCatalog;
use crate::config::Config;
use crate::error::{CartError, Result};
use crate::models::{
    AddItemRequest, CartKey, EnrichedCart, HealthResponse, StatsResponse, UpdateQuantityRequest,
};
use crate::service::CartService;
use crate::store::MemoryCartStore;

/// Header naming the user whose cart is addressed.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header selecting the cart scope when scoped carts are enabled.
pub const SCOPE_HEADER: &str = "x-cart-scope";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub carts: Arc<CartService>,
    /// In-process snapshot cache, shared with the cleanup task
    pub snapshots: Arc<MemoryCache>,
}

impl AppState {
    pub fn new(carts: CartService, snapshots: Arc<MemoryCache>) -> Self {
        Self {
            carts: Arc::new(carts),
            snapshots,
        }
    }

    /// Wires the service to in-memory collaborators sized by the Config.
    pub fn from_config(config: &Config, catalog: MemoryCatalog) -> Self {
        let snapshots = Arc::new(MemoryCache::new(config.cache_max_entries));
        let carts = CartService::new(
            Arc::new(MemoryCartStore::new()),
            snapshots.clone(),
            Arc::new(catalog),
            config,
        );
        Self::new(carts, snapshots)
    }
}

// == Cart User Extractor ==
/// The cart addressed by a request, read from its headers.
#[derive(Debug, Clone)]
pub struct CartUser(pub CartKey);

#[async_trait]
impl<S> FromRequestParts<S> for CartUser
where
    S: Send + Sync,
{
    type Rejection = CartError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let user_id = header(USER_ID_HEADER).ok_or_else(|| {
            CartError::Validation(format!("missing {} header", USER_ID_HEADER))
        })?;

        Ok(CartUser(CartKey {
            user_id,
            scope: header(SCOPE_HEADER),
        }))
    }
}

/// Handler for GET /cart
pub async fn get_cart_handler(
    State(state): State<AppState>,
    CartUser(key): CartUser,
) -> Result<Json<EnrichedCart>> {
    Ok(Json(state.carts.get_cart(&key).await?))
}

/// Handler for POST /cart/items
pub async fn add_item_handler(
    State(state): State<AppState>,
    CartUser(key): CartUser,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<EnrichedCart>> {
    let cart = state
        .carts
        .add_item(&key, &req.item_id, req.quantity)
        .await?;
    Ok(Json(cart))
}

/// Handler for PUT /cart/items/:item_id
pub async fn update_item_handler(
    State(state): State<AppState>,
    CartUser(key): CartUser,
    Path(item_id): Path<String>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Result<Json<EnrichedCart>> {
    let cart = state
        .carts
        .update_item_quantity(&key, &item_id, req.quantity)
        .await?;
    Ok(Json(cart))
}

/// Handler for DELETE /cart/items/:item_id
pub async fn remove_item_handler(
    State(state): State<AppState>,
    CartUser(key): CartUser,
    Path(item_id): Path<String>,
) -> Result<Json<EnrichedCart>> {
    Ok(Json(state.carts.remove_item(&key, &item_id).await?))
}

/// Handler for DELETE /cart
pub async fn clear_cart_handler(
    State(state): State<AppState>,
    CartUser(key): CartUser,
) -> Result<Json<EnrichedCart>> {
    Ok(Json(state.carts.clear_cart(&key).await?))
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.snapshots.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
