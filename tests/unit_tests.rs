// Unit tests for Estate Gateway

use estate_gateway::core::{
    extractor::{extract, extract_from, parse_decimal, DocumentNode},
    resolver::{generate_candidates, resolve, MAX_PLAUSIBLE_PRICE, MIN_PLAUSIBLE_PRICE},
};
use estate_gateway::models::{Candidate, RuleTag};
use serde_json::{json, Map, Value};
use std::borrow::Cow;

fn features(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

/// Document graph with shared and cyclic references, addressed by index
enum GraphNode {
    Number(f64),
    Text(String),
    Mapping(Vec<(String, usize)>),
}

struct Graph {
    nodes: Vec<GraphNode>,
}

#[derive(Clone, Copy)]
struct GraphRef<'a> {
    graph: &'a Graph,
    index: usize,
}

impl<'a> DocumentNode<'a> for GraphRef<'a> {
    type Id = usize;

    fn id(self) -> usize {
        self.index
    }

    fn number(self) -> Option<f64> {
        match &self.graph.nodes[self.index] {
            GraphNode::Number(n) if n.is_finite() => Some(*n),
            GraphNode::Text(s) => parse_decimal(s),
            _ => None,
        }
    }

    fn is_container(self) -> bool {
        matches!(self.graph.nodes[self.index], GraphNode::Mapping(_))
    }

    fn entries(self) -> Vec<(Cow<'a, str>, Self)> {
        let graph = self.graph;
        match &graph.nodes[self.index] {
            GraphNode::Mapping(children) => children
                .iter()
                .map(|(key, index)| (Cow::Borrowed(key.as_str()), GraphRef { graph, index: *index }))
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[test]
fn test_extract_terminates_on_self_cycle() {
    // 0: { self: 0, rooms: 3 }
    let graph = Graph {
        nodes: vec![
            GraphNode::Mapping(vec![("self".to_string(), 0), ("rooms".to_string(), 1)]),
            GraphNode::Number(3.0),
        ],
    };

    assert_eq!(extract_from(GraphRef { graph: &graph, index: 0 }), Some(3.0));
}

#[test]
fn test_extract_terminates_on_transitive_cycle() {
    // 0: { child: 1 }, 1: { back: 0, inner: 2 }, 2: { price: "640,000" }
    let graph = Graph {
        nodes: vec![
            GraphNode::Mapping(vec![("child".to_string(), 1)]),
            GraphNode::Mapping(vec![("back".to_string(), 0), ("inner".to_string(), 2)]),
            GraphNode::Mapping(vec![("price".to_string(), 3)]),
            GraphNode::Text("640,000".to_string()),
        ],
    };

    assert_eq!(extract_from(GraphRef { graph: &graph, index: 0 }), Some(640_000.0));
}

#[test]
fn test_extract_cycle_without_numbers() {
    let graph = Graph {
        nodes: vec![
            GraphNode::Mapping(vec![("a".to_string(), 1)]),
            GraphNode::Mapping(vec![("b".to_string(), 0), ("label".to_string(), 2)]),
            GraphNode::Text("n/a".to_string()),
        ],
    };

    assert_eq!(extract_from(GraphRef { graph: &graph, index: 0 }), None);
}

#[test]
fn test_hit_key_beats_earlier_non_hit() {
    let doc = json!({
        "a": 1,
        "b": [2, 3],
        "model": { "output": { "predicted_value": 4.5 } }
    });
    assert_eq!(extract(&doc), Some(4.5));
}

#[test]
fn test_first_non_hit_in_traversal_order() {
    // Keys of a mapping are read in order; nested containers wait on the stack
    let doc = json!({
        "alpha": { "count": 9 },
        "beta": 7,
        "gamma": 8
    });
    assert_eq!(extract(&doc), Some(7.0));
}

#[test]
fn test_fallback_uses_upstream_key_order() {
    let doc: Value = serde_json::from_str(r#"{"zeta": 8, "mid": {"n": 1}, "alpha": 7}"#).unwrap();
    assert_eq!(extract(&doc), Some(8.0));

    // echoed back to callers as written upstream
    assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"zeta":8,"mid":{"n":1},"alpha":7}"#);
}

#[test]
fn test_nested_containers_popped_last_in_first_out() {
    let doc = json!({
        "a": { "n": 1 },
        "b": { "n": 2 }
    });
    assert_eq!(extract(&doc), Some(2.0));
}

#[test]
fn test_numbers_inside_sequences() {
    assert_eq!(extract(&json!([[], [810.0]])), Some(810.0));
    assert_eq!(extract(&json!({ "predictions": [512.25] })), Some(512.25));
}

#[test]
fn test_resolve_per_area_rate() {
    let chosen = resolve(800.0, &features(json!({ "procedure_area": 1200 })));
    assert_eq!(chosen, Candidate::new(960_000.0, RuleTag::PerSqm));
}

#[test]
fn test_resolve_log_rate_with_area() {
    // raw 12.5, area 1000: per_sqm and x1000 are 12,500; exp is ~268k and
    // exp_per_sqm ~268M, both plausible, the per-area one wins
    let candidates = generate_candidates(12.5, 1000.0);
    let per_sqm = candidates.iter().find(|c| c.rule == RuleTag::PerSqm).unwrap();
    let x1000 = candidates.iter().find(|c| c.rule == RuleTag::X1000).unwrap();
    assert_eq!(per_sqm.value, 12_500.0);
    assert_eq!(x1000.value, 12_500.0);

    let chosen = resolve(12.5, &features(json!({ "procedure_area": 1000 })));
    assert_eq!(chosen.rule, RuleTag::ExpPerSqm);
    assert!((chosen.value - 12.5f64.exp() * 1000.0).abs() < 1e-3);
}

#[test]
fn test_resolve_falls_back_to_largest() {
    // 30, e^30, 10^30 and 30,000 are all outside the plausible range
    let chosen = resolve(30.0, &features(json!({})));
    assert_eq!(chosen.rule, RuleTag::Pow10);
    assert!(chosen.value > MAX_PLAUSIBLE_PRICE);

    // tiny values: everything below the floor, x1000 is the largest
    let chosen = resolve(0.5, &features(json!({})));
    assert_eq!(chosen.rule, RuleTag::X1000);
    assert!(chosen.value < MIN_PLAUSIBLE_PRICE);
}

#[test]
fn test_resolve_prefers_per_area_over_larger_plain() {
    // raw 5,000, area 20: per_sqm 100,000 beats x1000 5,000,000
    let chosen = resolve(5_000.0, &features(json!({ "procedure_area": 20 })));
    assert_eq!(chosen, Candidate::new(100_000.0, RuleTag::PerSqm));
}

#[test]
fn test_resolve_ignores_non_positive_area() {
    let chosen = resolve(800.0, &features(json!({ "procedure_area": -10 })));
    assert_eq!(chosen.rule, RuleTag::X1000);
}

#[test]
fn test_resolve_is_idempotent() {
    let input = features(json!({ "procedure_area": "85", "rooms": 3 }));
    for raw in [0.5, 12.5, 800.0, 3_500_000.0] {
        assert_eq!(resolve(raw, &input), resolve(raw, &input));
    }
}

#[test]
fn test_used_rule_raw_keeps_raw_value() {
    let chosen = resolve(3_500_000.0, &features(json!({})));
    assert_eq!(chosen.rule, RuleTag::Raw);
    assert_eq!(chosen.value, 3_500_000.0);
}
