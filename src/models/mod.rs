//! Domain models and HTTP DTOs for the cart service.

pub mod cart;
pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use cart::{Cart, CartKey, CartLine, EnrichedCart, EnrichedCartLine};
pub use product::ProductRecord;
pub use requests::{AddItemRequest, UpdateQuantityRequest};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
