// Integration tests for divsel
use divsel::{
    completeness, default_distance, input, select_diverse_examples, select_indices_with_rng,
    Error, SamplingStrategy, SelectionOptions, SequenceMode,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::collections::HashSet;

fn people() -> Vec<Value> {
    vec![
        json!({"id": 1, "name": "John", "age": 25, "city": "NY"}),
        json!({"id": 2, "name": "Jane", "age": 30, "city": "LA"}),
        json!({"id": 3, "name": "Bob", "age": 25, "city": "NY"}),
        json!({"id": 4, "name": "Alice", "age": 35, "city": "SF"}),
    ]
}

fn catalog(size: usize) -> Vec<Value> {
    (0..size)
        .map(|i| {
            let price = ((i * 7919) % 1000) as f64 / 10.0;
            let category = ["food", "tools", "books", "toys"][i % 4];
            let tags: Vec<&str> = ["a", "b", "c"].iter().copied().take(i % 4).collect();
            let mut record = json!({
                "sku": format!("SKU-{:05}", i),
                "price": price,
                "category": category,
                "stock": {"warehouse": i % 3, "count": (i * 31) % 97},
                "tags": tags,
            });
            if i % 5 == 0 {
                record["price"] = Value::Null;
            }
            record
        })
        .collect()
}

// ==================== Selection Tests ====================

#[test]
fn test_people_scenario() {
    let items = people();
    let picked = select_diverse_examples(&items, &SelectionOptions::new(2)).unwrap();

    assert_eq!(picked.len(), 2);
    for record in &picked {
        assert!(items.contains(record));
    }
    assert_ne!(picked[0]["id"], picked[1]["id"]);
}

#[test]
fn test_custom_age_distance_scenario() {
    let by_age = |a: &Value, b: &Value| {
        (a["age"].as_f64().unwrap_or(0.0) - b["age"].as_f64().unwrap_or(0.0)).abs() / 35.0
    };
    // every record is fully populated, so the run starts from the first record
    let options = SelectionOptions::new(2)
        .with_prioritize_complete(true)
        .with_completeness_weight(0.0)
        .with_distance(by_age);

    let picked = select_diverse_examples(&people(), &options).unwrap();
    let age_gap = (picked[0]["age"].as_f64().unwrap() - picked[1]["age"].as_f64().unwrap()).abs();
    assert!(age_gap > 5.0, "age gap was {}", age_gap);
}

#[test]
fn test_empty_collection() {
    let none: Vec<Value> = Vec::new();
    assert_eq!(select_diverse_examples(&none, &SelectionOptions::new(0)).unwrap(), Vec::<Value>::new());
}

#[test]
fn test_too_many_examples_requested() {
    let result = select_diverse_examples(&people(), &SelectionOptions::new(10));
    assert!(matches!(
        result,
        Err(Error::InsufficientItems { requested: 10, available: 4 })
    ));
}

#[test]
fn test_bad_completeness_weight_rejected() {
    let none: Vec<Value> = Vec::new();
    for options in [
        SelectionOptions::new(2).with_completeness_weight(1.01),
        SelectionOptions::new(0).with_completeness_weight(-1.0),
        SelectionOptions::new(2).with_prioritize_complete(true).with_completeness_weight(7.0),
    ] {
        assert!(matches!(select_diverse_examples(&people(), &options), Err(Error::InvalidConfig(_))));
        assert!(matches!(select_diverse_examples(&none, &options), Err(Error::InvalidConfig(_))));
    }
}

#[test]
fn test_count_and_uniqueness_across_sizes() {
    let items = catalog(300);
    let mut rng = StdRng::seed_from_u64(2024);

    for k in [1, 2, 17, 120, 300] {
        for prioritize in [false, true] {
            let options = SelectionOptions::new(k).with_prioritize_complete(prioritize);
            let selection = select_indices_with_rng(&items, &options, &mut rng).unwrap();
            assert_eq!(selection.len(), k);
            let unique: HashSet<_> = selection.indices.iter().collect();
            assert_eq!(unique.len(), k, "duplicate picks for k={}", k);
        }
    }
}

#[test]
fn test_large_collection_uses_reservoir() {
    let items = catalog(12_000);
    let options = SelectionOptions::new(8).with_sample_size(200);
    let selection = select_indices_with_rng(&items, &options, &mut StdRng::seed_from_u64(5)).unwrap();

    assert_eq!(selection.strategy, SamplingStrategy::Reservoir);
    assert_eq!(selection.working_set_size, 200);
    assert_eq!(selection.len(), 8);
}

#[test]
fn test_default_sample_size_caps_working_set() {
    let items = catalog(1500);
    let selection =
        select_indices_with_rng(&items, &SelectionOptions::new(3), &mut StdRng::seed_from_u64(5)).unwrap();

    assert_eq!(selection.strategy, SamplingStrategy::ShuffleTruncate);
    assert_eq!(selection.working_set_size, 1000);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let items = catalog(400);
    let options = SelectionOptions::new(12).with_seed(99).with_sequence_mode(SequenceMode::Members);

    let first = select_diverse_examples(&items, &options).unwrap();
    let second = select_diverse_examples(&items, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_prioritize_complete_prefers_populated_records() {
    let items = catalog(200);
    let options = SelectionOptions::new(20)
        .with_prioritize_complete(true)
        .with_completeness_weight(1.0);
    let picked = select_diverse_examples(&items, &options).unwrap();

    // with full weight on completeness, records with a null price never make the cut
    assert!(picked.iter().all(|r| !r["price"].is_null()));
}

// ==================== Metric Tests ====================

#[test]
fn test_distance_properties() {
    let items = catalog(40);
    for a in &items {
        assert_eq!(default_distance(a, a), 0.0);
        for b in &items {
            let d = default_distance(a, b);
            assert!((0.0..=1.0).contains(&d), "distance {} out of range", d);
            assert_eq!(d, default_distance(b, a));
        }
    }
}

#[test]
fn test_distance_scenarios() {
    assert_eq!(default_distance(&json!({"a": 1, "b": "test"}), &json!({"a": 1, "b": "test"})), 0.0);
    let d = default_distance(&json!({"a": 1, "b": "test"}), &json!({"a": 1}));
    assert!(d > 0.0 && d <= 1.0);
}

#[test]
fn test_completeness_properties() {
    for record in catalog(50) {
        let c = completeness(&record);
        assert!((0.0..=1.0).contains(&c));
    }
    assert_eq!(completeness(&json!({})), 0.0);
}

// ==================== Input Tests ====================

#[test]
fn test_select_from_nested_document() {
    let doc = r#"{"meta": {"count": 4}, "data": {"people": [
        {"id": 1, "name": "John", "age": 25, "city": "NY"},
        {"id": 2, "name": "Jane", "age": 30, "city": "LA"},
        {"id": 3, "name": "Bob", "age": 25, "city": "NY"},
        {"id": 4, "name": "Alice", "age": 35, "city": "SF"}
    ]}}"#;

    let records = input::parse_records(doc, Some("data.people")).unwrap();
    assert_eq!(records, people());

    let picked = select_diverse_examples(&records, &SelectionOptions::new(3).with_seed(1)).unwrap();
    assert_eq!(picked.len(), 3);
}
