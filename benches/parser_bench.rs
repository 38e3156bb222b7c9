use criterion::{black_box, criterion_group, criterion_main, Criterion};
use json_ast::{parse, parse_json, tokenize};
use serde_json::Value;

// A sample "medium" JSON document
const MEDIUM_JSON: &str = r#"
{
    "name": "Babbage",
    "age": 30,
    "admin": true,
    "friends": ["Ada", "Charles", "Grace"],
    "tasks": [
        { "id": 1, "title": "Parse JSON", "done": false },
        { "id": 2, "title": "Write docs\nthen ship", "done": true }
    ],
    "nested": {"key": [null, 1, 1.23e4]}
}
"#;

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("JSON Parsing");

    group.bench_function("tokenize", |b| {
        b.iter(|| tokenize(black_box(MEDIUM_JSON)).unwrap())
    });

    // Tokens are consumed by the parser, so each iteration re-lexes.
    group.bench_function("tokenize + parse", |b| {
        b.iter(|| parse(tokenize(black_box(MEDIUM_JSON)).unwrap()).unwrap())
    });

    group.bench_function("parse_json", |b| {
        b.iter(|| parse_json(black_box(MEDIUM_JSON)).unwrap())
    });

    group.bench_function("serde_json::from_str", |b| {
        b.iter(|| {
            let _: Value = serde_json::from_str(black_box(MEDIUM_JSON)).unwrap();
        })
    });

    group.finish();
}

fn bench_deep_nesting(c: &mut Criterion) {
    let deep = "[".repeat(90) + &"]".repeat(90);
    c.bench_function("parse_json 90 levels deep", |b| {
        b.iter(|| parse_json(black_box(&deep)).unwrap())
    });
}

criterion_group!(benches, bench_parsing, bench_deep_nesting);
criterion_main!(benches);
