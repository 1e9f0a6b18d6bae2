//! Estate Gateway - backend gateway for the estate site
//!
//! Fronts the price-prediction model, the recommendation model, the chat
//! webhook and the listings warehouse. The prediction proxy probes the model
//! for a working request shape, pulls a number out of whatever it answers
//! and picks the most plausible price interpretation of that number.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{extract, is_price_key, resolve};
pub use models::{Candidate, ProxyResult, RuleTag};
pub use services::{PredictionDispatcher, PredictionError};
