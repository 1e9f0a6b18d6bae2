use crate::core::extractor::parse_numeric;
use crate::models::{Candidate, RuleTag};
use serde_json::{Map, Value};

/// Lowest absolute price treated as a real listing price
pub const MIN_PLAUSIBLE_PRICE: f64 = 50_000.0;

/// Highest absolute price treated as a real listing price
pub const MAX_PLAUSIBLE_PRICE: f64 = 2_000_000_000.0;

/// Feature names read, in order, for the property surface area
const AREA_FEATURES: [&str; 2] = ["procedure_area", "area"];

/// Surface area carried in the request features, 0 when absent or not numeric
pub fn area_feature(features: &Map<String, Value>) -> f64 {
    AREA_FEATURES
        .iter()
        .find_map(|name| features.get(*name).and_then(parse_numeric))
        .unwrap_or(0.0)
}

#[inline]
pub fn is_plausible(value: f64) -> bool {
    (MIN_PLAUSIBLE_PRICE..=MAX_PLAUSIBLE_PRICE).contains(&value)
}

/// Every interpretation of `raw` under the fixed transform rules
///
/// Per-area rules only apply when `area > 0`. Transforms that overflow to a
/// non-finite value are dropped.
pub fn generate_candidates(raw: f64, area: f64) -> Vec<Candidate> {
    let mut candidates = vec![
        Candidate::new(raw, RuleTag::Raw),
        Candidate::new(raw.exp(), RuleTag::Exp),
        Candidate::new(10f64.powf(raw), RuleTag::Pow10),
        Candidate::new(raw * 1000.0, RuleTag::X1000),
    ];

    if area > 0.0 {
        candidates.extend([
            Candidate::new(raw * area, RuleTag::PerSqm),
            Candidate::new(raw.exp() * area, RuleTag::ExpPerSqm),
            Candidate::new(10f64.powf(raw) * area, RuleTag::Pow10PerSqm),
        ]);
    }

    candidates.retain(|c| c.value.is_finite());
    candidates
}

/// Pick the final price interpretation for a raw model output.
///
/// Plausible candidates win; among them per-area rules beat the others and
/// then the larger value wins. With nothing plausible the largest candidate
/// overall is returned. Equal values keep the earlier rule.
pub fn resolve(raw: f64, features: &Map<String, Value>) -> Candidate {
    let candidates = generate_candidates(raw, area_feature(features));

    let plausible = candidates
        .iter()
        .filter(|c| is_plausible(c.value))
        .fold(None::<Candidate>, |best, c| match best {
            Some(b) if (b.rule.is_per_area(), b.value) >= (c.rule.is_per_area(), c.value) => Some(b),
            _ => Some(*c),
        });

    if let Some(chosen) = plausible {
        tracing::debug!("Resolved raw {} to {} via {:?}", raw, chosen.value, chosen.rule);
        return chosen;
    }

    let largest = candidates
        .iter()
        .fold(None::<Candidate>, |best, c| match best {
            Some(b) if b.value >= c.value => Some(b),
            _ => Some(*c),
        });

    let chosen = largest.unwrap_or(Candidate::new(raw, RuleTag::Raw));
    tracing::debug!(
        "No plausible interpretation of raw {}, using largest {} via {:?}",
        raw,
        chosen.value,
        chosen.rule
    );
    chosen
}
