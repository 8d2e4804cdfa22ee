//! Storefront Cart - a single-storefront shopping cart service
//!
//! Keeps each user's cart consistent across an authoritative row store and a
//! write-through snapshot cache, and enriches responses with live catalog data.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::CartError;
pub use service::CartService;
pub use tasks::spawn_cleanup_task;
