use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashSet;
use std::hash::Hash;

/// Key fragments that mark a field as carrying the prediction itself
const HIT_FRAGMENTS: [&str; 4] = ["price", "predict", "value", "amount"];

/// Whole key segments (split on `_`, `-`, `.` and spaces) that are also hits
const HIT_SEGMENTS: [&str; 4] = ["pred", "preds", "yhat", "estimate"];

/// A handle into a response document that the extractor can walk.
///
/// Handles are cheap copies; `id` must be stable for the same node so the
/// traversal can visit every container at most once, even when the
/// document shares or cycles back to a node.
pub trait DocumentNode<'a>: Copy {
    type Id: Eq + Hash;

    /// Identity of the node within its document
    fn id(self) -> Self::Id;

    /// Numeric interpretation of a scalar node, if it has one
    fn number(self) -> Option<f64>;

    /// True for mappings and sequences
    fn is_container(self) -> bool;

    /// Key/child pairs of a container (sequence children are keyed by index)
    fn entries(self) -> Vec<(Cow<'a, str>, Self)>;
}

impl<'a> DocumentNode<'a> for &'a Value {
    type Id = *const Value;

    fn id(self) -> Self::Id {
        self as *const Value
    }

    fn number(self) -> Option<f64> {
        parse_numeric(self)
    }

    fn is_container(self) -> bool {
        matches!(self, Value::Object(_) | Value::Array(_))
    }

    fn entries(self) -> Vec<(Cow<'a, str>, Self)> {
        match self {
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| (Cow::Borrowed(key.as_str()), value))
                .collect(),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, value)| (Cow::Owned(index.to_string()), value))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Returns true when a field name looks like it holds a price or prediction
///
/// Matching is case-insensitive: `price`, `predicted_price`, `Prediction`,
/// `value`, `total_amount`, `y_pred` and `yhat` are all hits.
pub fn is_price_key(key: &str) -> bool {
    let lower = key.to_lowercase();

    if HIT_FRAGMENTS.iter().any(|fragment| lower.contains(fragment)) {
        return true;
    }

    lower
        .split(|c: char| c == '_' || c == '-' || c == '.' || c.is_whitespace())
        .any(|segment| HIT_SEGMENTS.contains(&segment))
}

/// Parse a plain decimal string such as `"1,250,000"` or `" 12.5 "`
///
/// Thousands separators (`,` and `_`) and whitespace are stripped first.
/// Exponents, hex and the textual infinities are rejected.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '_')
        .collect();

    let unsigned = cleaned.strip_prefix(['-', '+']).unwrap_or(cleaned.as_str());
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let int_ok = int_part.chars().all(|c| c.is_ascii_digit());
    let frac_ok = match frac_part {
        Some(f) => !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()),
        None => true,
    };
    if !int_ok || !frac_ok || (int_part.is_empty() && frac_part.is_none()) {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numeric interpretation of a JSON scalar: finite numbers and decimal strings
pub fn parse_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Find the most plausible raw number in a response document.
///
/// Walks every container with an explicit stack. A number under a price-like
/// key ends the search at once; otherwise the first number seen under any
/// other key is kept as the fallback. A bare numeric document is returned
/// as-is.
pub fn extract_from<'a, N: DocumentNode<'a>>(root: N) -> Option<f64> {
    if let Some(value) = root.number() {
        return Some(value);
    }

    let mut stack = vec![root];
    let mut visited = HashSet::new();
    let mut fallback = None;

    while let Some(node) = stack.pop() {
        if !visited.insert(node.id()) {
            continue;
        }

        for (key, child) in node.entries() {
            if child.is_container() {
                stack.push(child);
                continue;
            }

            let Some(value) = child.number() else {
                continue;
            };

            if is_price_key(&key) {
                return Some(value);
            }

            fallback.get_or_insert(value);
        }
    }

    fallback
}

/// Extract the raw prediction from an upstream JSON response
pub fn extract(doc: &Value) -> Option<f64> {
    extract_from(doc)
}
