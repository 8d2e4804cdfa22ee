//! API Routes
//!
//! Configures the Axum router with all cart endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_item_handler, clear_cart_handler, get_cart_handler, health_handler, remove_item_handler,
    stats_handler, update_item_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /cart` - Enriched cart of the calling user
/// - `DELETE /cart` - Remove every line
/// - `POST /cart/items` - Add an item or overwrite its quantity
/// - `PUT /cart/items/:item_id` - Set a quantity, removing the line at zero
/// - `DELETE /cart/items/:item_id` - Remove one line
/// - `GET /cache/stats` - Snapshot cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cart", get(get_cart_handler).delete(clear_cart_handler))
        .route("/cart/items", post(add_item_handler))
        .route(
            "/cart/items/:item_id",
            put(update_item_handler).delete(remove_item_handler),
        )
        .route("/cache/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
