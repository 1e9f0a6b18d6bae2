// Criterion benchmarks for Estate Gateway

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use estate_gateway::core::{extract, resolve};
use serde_json::{json, Map, Value};

/// Response nested `depth` levels deep with filler numbers at each level
/// and the prediction at the bottom
fn nested_response(depth: usize) -> Value {
    let mut doc = json!({ "predicted_price": 812.5 });
    for level in 0..depth {
        doc = json!({
            "level": level,
            "meta": { "took_ms": 12, "version": "1.4.2" },
            "items": [1, 2, 3],
            "inner": doc,
        });
    }
    doc
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for depth in [1, 10, 100].iter() {
        let doc = nested_response(*depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &doc, |b, doc| {
            b.iter(|| extract(black_box(doc)));
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut features = Map::new();
    features.insert("procedure_area".to_string(), json!(85));
    features.insert("rooms".to_string(), json!(3));

    c.bench_function("resolve_per_area", |b| {
        b.iter(|| resolve(black_box(8.2), black_box(&features)));
    });

    let empty = Map::new();
    c.bench_function("resolve_no_area", |b| {
        b.iter(|| resolve(black_box(350_000.0), black_box(&empty)));
    });
}

criterion_group!(benches, bench_extract, bench_resolve);
criterion_main!(benches);
