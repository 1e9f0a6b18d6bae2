use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Transform that turned a raw model output into a candidate price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTag {
    Raw,
    PerSqm,
    ExpPerSqm,
    Pow10PerSqm,
    Exp,
    Pow10,
    X1000,
}

impl RuleTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleTag::Raw => "raw",
            RuleTag::PerSqm => "per_sqm",
            RuleTag::ExpPerSqm => "exp_per_sqm",
            RuleTag::Pow10PerSqm => "pow10_per_sqm",
            RuleTag::Exp => "exp",
            RuleTag::Pow10 => "pow10",
            RuleTag::X1000 => "x1000",
        }
    }

    /// True for the rules that multiply by the surface area
    pub fn is_per_area(&self) -> bool {
        matches!(self, RuleTag::PerSqm | RuleTag::ExpPerSqm | RuleTag::Pow10PerSqm)
    }
}

impl std::fmt::Display for RuleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One interpretation of a raw model output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub value: f64,
    pub rule: RuleTag,
}

impl Candidate {
    pub fn new(value: f64, rule: RuleTag) -> Self {
        Self { value, rule }
    }
}

/// Outcome of one proxied prediction request
///
/// `predicted_price_raw` is the number exactly as found upstream;
/// `predicted_price` and `used_rule` are both set or both absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResult {
    /// Upstream status of the attempt that produced this result
    #[serde(skip)]
    pub status: u16,
    pub predicted_price: Option<f64>,
    pub predicted_price_raw: Option<f64>,
    pub used_rule: Option<RuleTag>,
    pub raw_response: Value,
}

impl ProxyResult {
    pub fn resolved(status: u16, raw_response: Value, raw: f64, chosen: Candidate) -> Self {
        Self {
            status,
            predicted_price: Some(chosen.value),
            predicted_price_raw: Some(raw),
            used_rule: Some(chosen.rule),
            raw_response,
        }
    }

    pub fn unresolved(status: u16, raw_response: Value) -> Self {
        Self {
            status,
            predicted_price: None,
            predicted_price_raw: None,
            used_rule: None,
            raw_response,
        }
    }
}

/// Listing row projected from the warehouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: String,
    pub title: Option<String>,
    pub city: Option<String>,
    pub price: Option<f64>,
    pub area: Option<f64>,
    pub rooms: Option<i32>,
    pub url: Option<String>,
}
