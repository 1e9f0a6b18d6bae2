// Core algorithm exports
pub mod attempts;
pub mod extractor;
pub mod resolver;

pub use attempts::{Attempt, BodyShape, ATTEMPTS, LAST_RESORT};
pub use extractor::{extract, extract_from, is_price_key, parse_decimal, parse_numeric, DocumentNode};
pub use resolver::{area_feature, generate_candidates, is_plausible, resolve};
