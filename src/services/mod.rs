// Service exports
pub mod chat;
pub mod prediction;
pub mod recommendation;
pub mod sessions;
pub mod warehouse;

pub use chat::{ChatError, ChatRelay};
pub use prediction::{PredictionDispatcher, PredictionError};
pub use recommendation::{RecommendationClient, RecommendationError, RelayedResponse};
pub use sessions::PreferenceStore;
pub use warehouse::{ListingsWarehouse, WarehouseError};
