// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Candidate, ListingRecord, ProxyResult, RuleTag};
pub use requests::{ChatRequest, ListingFilters};
pub use responses::{ChatResponse, ErrorResponse, HealthResponse, ListingsResponse, PreferencesResponse};
