use serde_json::{json, Value};

/// Primary model path
pub const PREDICT_PATH: &str = "/predict";

/// Some model servers only expose the root path
pub const ROOT_PATH: &str = "/";

/// How the request features are wrapped before they are POSTed upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    /// The feature object as-is
    Unwrapped,
    /// `{ "data": features }`
    Data,
    /// `{ "data": [features] }`
    DataList,
}

impl BodyShape {
    pub fn wrap(self, features: &Value) -> Value {
        match self {
            BodyShape::Unwrapped => features.clone(),
            BodyShape::Data => json!({ "data": features }),
            BodyShape::DataList => json!({ "data": [features] }),
        }
    }
}

/// One (path, shape) combination tried against the model endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    pub path: &'static str,
    pub shape: BodyShape,
}

impl Attempt {
    pub const fn new(path: &'static str, shape: BodyShape) -> Self {
        Self { path, shape }
    }

    /// Full URL for this attempt under `base_url`
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}

/// Probe order: every shape on `/predict`, then every shape on `/`
pub const ATTEMPTS: [Attempt; 6] = [
    Attempt::new(PREDICT_PATH, BodyShape::Unwrapped),
    Attempt::new(PREDICT_PATH, BodyShape::Data),
    Attempt::new(PREDICT_PATH, BodyShape::DataList),
    Attempt::new(ROOT_PATH, BodyShape::Unwrapped),
    Attempt::new(ROOT_PATH, BodyShape::Data),
    Attempt::new(ROOT_PATH, BodyShape::DataList),
];

/// Issued once after every probe came back without a number.
///
/// Same as the first probe; kept as a single extra call, not a retry loop.
pub const LAST_RESORT: Attempt = Attempt::new(PREDICT_PATH, BodyShape::Unwrapped);
