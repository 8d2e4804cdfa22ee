//! API Module
//!
//! HTTP handlers and routing for the cart service.
//!
//! # Endpoints
//! - `GET /cart`, `DELETE /cart`
//! - `POST /cart/items`
//! - `PUT /cart/items/:item_id`, `DELETE /cart/items/:item_id`
//! - `GET /cache/stats`
//! - `GET /health`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
