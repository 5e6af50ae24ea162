//! Pipeline and transformer behavior over realistic frames.

use frame_model::{DataFrame, Field, FieldConfig, Value};
use frame_transform::{
    TransformerConfig, WarningKind, standard_registry, transform, transform_with_registry,
};
use proptest::prelude::*;
use serde_json::json;

fn series_with_names_to_match() -> Vec<DataFrame> {
    vec![
        DataFrame::new(vec![
            Field::numbers("startsWithA", [1.0, 2.0]),
            Field::numbers("B", [3.0, 4.0]),
            Field::numbers("startsWithC", [5.0, 6.0]),
            Field::numbers("D", [7.0, 8.0]),
        ])
        .unwrap(),
    ]
}

fn field_names(frames: &[DataFrame]) -> Vec<Vec<String>> {
    frames
        .iter()
        .map(|frame| frame.field_names().into_iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn empty_pipeline_is_identity() {
    let frames = series_with_names_to_match();
    assert_eq!(transform(&[], &frames), frames);
}

#[test]
fn filter_include_pattern() {
    let configs = [TransformerConfig::new(
        "filterFieldsByName",
        json!({"includePattern": "/^(startsWith)/"}),
    )];
    let output = transform(&configs, &series_with_names_to_match());
    insta::assert_debug_snapshot!(field_names(&output), @r#"
    [
        [
            "startsWithA",
            "startsWithC",
        ],
    ]
    "#);
}

#[test]
fn filter_exclude_pattern() {
    let configs = [TransformerConfig::new(
        "filterFieldsByName",
        json!({"excludePattern": "/^(startsWith)/"}),
    )];
    let output = transform(&configs, &series_with_names_to_match());
    assert_eq!(field_names(&output), vec![vec!["B", "D"]]);
}

#[test]
fn filter_exclude_then_include() {
    let configs = [TransformerConfig::new(
        "filterFieldsByName",
        json!({"excludePattern": "/^(startsWith)/", "includePattern": "/^(B)$/"}),
    )];
    let output = transform(&configs, &series_with_names_to_match());
    assert_eq!(field_names(&output), vec![vec!["B"]]);
}

#[test]
fn filter_with_invalid_include_keeps_nothing() {
    let configs = [TransformerConfig::new(
        "filterFieldsByName",
        json!({"includePattern": "/(startsWith/"}),
    )];
    let result = transform_with_registry(
        standard_registry(),
        &configs,
        &series_with_names_to_match(),
    );
    assert_eq!(result.frames.len(), 1);
    assert_eq!(result.frames[0].width(), 0);
    assert_eq!(result.frames[0].length(), 2);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].kind, WarningKind::InvalidPattern);
    assert_eq!(result.warnings[0].id, "filterFieldsByName");
}

#[test]
fn filter_by_ref_id_with_invalid_include_warns() {
    let frames: Vec<DataFrame> = series_with_names_to_match()
        .into_iter()
        .map(|frame| frame.with_ref_id("A"))
        .collect();
    let configs = [TransformerConfig::new("filterByRefId", json!({"include": "/[A/"}))];
    let result = transform_with_registry(standard_registry(), &configs, &frames);
    assert!(result.frames.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].kind, WarningKind::InvalidPattern);
}

#[test]
fn organize_orders_by_index_and_excludes() {
    let frames = vec![
        DataFrame::new(vec![
            Field::times("time", [1.0]),
            Field::numbers("temperature", [10.0]),
            Field::numbers("humidity", [50.0]),
        ])
        .unwrap(),
    ];
    let configs = [TransformerConfig::new(
        "organize",
        json!({
            "indexByName": {"time": 2, "temperature": 0, "humidity": 1},
            "excludeByName": {"time": true}
        }),
    )];
    let output = transform(&configs, &frames);
    assert_eq!(field_names(&output), vec![vec!["temperature", "humidity"]]);
}

#[test]
fn organize_appends_unindexed_fields() {
    let frames = vec![
        DataFrame::new(vec![
            Field::times("time", [1.0]),
            Field::numbers("pressure", [1000.0]),
            Field::numbers("humidity", [50.0]),
        ])
        .unwrap(),
    ];
    let configs = [TransformerConfig::new(
        "organize",
        json!({
            "indexByName": {"time": 2, "temperature": 0, "humidity": 1},
            "excludeByName": {"humidity": true}
        }),
    )];
    let output = transform(&configs, &frames);
    assert_eq!(field_names(&output), vec![vec!["time", "pressure"]]);
}

#[test]
fn append_unions_fields_and_pads_missing_slots_with_null() {
    let frames = vec![
        DataFrame::new(vec![
            Field::numbers("A", [1.0]),
            Field::numbers("B", [2.0]),
        ])
        .unwrap(),
        DataFrame::new(vec![
            Field::numbers("B", [3.0]),
            Field::numbers("C", [4.0]),
        ])
        .unwrap(),
    ];
    let output = transform(&[TransformerConfig::new("append", json!({}))], &frames);
    assert_eq!(output.len(), 1);
    let merged = &output[0];
    assert_eq!(merged.field_names(), vec!["A", "B", "C"]);
    assert_eq!(merged.length(), 2);
    assert_eq!(
        merged.row(0).unwrap(),
        vec![&Value::Number(1.0), &Value::Number(2.0), &Value::Null]
    );
    assert_eq!(
        merged.row(1).unwrap(),
        vec![&Value::Null, &Value::Number(3.0), &Value::Number(4.0)]
    );
}

#[test]
fn reduce_skips_nan() {
    let frames = vec![DataFrame::new(vec![Field::numbers("value", [1.0, f64::NAN, 3.0])]).unwrap()];
    let output = transform(
        &[TransformerConfig::new("reduce", json!({"calcs": ["min", "max"]}))],
        &frames,
    );
    let reduced = &output[0];
    assert_eq!(reduced.field_names(), vec!["value Min", "value Max"]);
    assert_eq!(reduced.fields()[0].values(), &[Value::Number(1.0)]);
    assert_eq!(reduced.fields()[1].values(), &[Value::Number(3.0)]);
}

#[test]
fn reduce_copies_field_config() {
    let config = FieldConfig::default().with_unit("celsius");
    let frames = vec![
        DataFrame::new(vec![Field::numbers("t", [1.0, 2.0]).with_config(config.clone())]).unwrap(),
    ];
    let output = transform(
        &[TransformerConfig::new("reduce", json!({"calcs": ["mean"]}))],
        &frames,
    );
    assert_eq!(output[0].fields()[0].config(), &config);
    assert_eq!(output[0].fields()[0].values(), &[Value::Number(1.5)]);
}

#[test]
fn stages_chain_over_previous_output() {
    let configs = [
        TransformerConfig::new("filterFieldsByName", json!({"excludePattern": "D"})),
        TransformerConfig::new("organize", json!({"renameByName": {"B": "Bee"}})),
        TransformerConfig::new("unknownStage", json!(null)),
        TransformerConfig::new("reduce", json!({"calcs": ["sum"]})),
    ];
    let result = transform_with_registry(
        standard_registry(),
        &configs,
        &series_with_names_to_match(),
    );
    assert_eq!(
        field_names(&result.frames),
        vec![vec!["startsWithA", "Bee", "startsWithC"]]
    );
    assert_eq!(result.frames[0].fields()[1].values(), &[Value::Number(7.0)]);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].kind, WarningKind::UnknownTransformer);
    assert_eq!(result.warnings[0].index, 2);
}

#[test]
fn inputs_are_not_mutated() {
    let frames = series_with_names_to_match();
    let snapshot = frames.clone();
    let configs = [
        TransformerConfig::new("organize", json!({"renameByName": {"B": "Bee"}})),
        TransformerConfig::new("append", json!({})),
    ];
    let _ = transform(&configs, &frames);
    assert_eq!(frames, snapshot);
}

proptest! {
    #[test]
    fn organize_keeps_every_unexcluded_field(
        names in prop::collection::hash_set("[a-z]{1,6}", 1..8),
        excluded in prop::collection::vec(any::<bool>(), 8),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let fields = names.iter().map(|n| Field::numbers(n.as_str(), [1.0])).collect();
        let frame = DataFrame::new(fields).unwrap();
        let exclude: serde_json::Map<String, serde_json::Value> = names
            .iter()
            .zip(&excluded)
            .map(|(n, e)| (n.clone(), json!(*e)))
            .collect();
        let output = transform(
            &[TransformerConfig::new("organize", json!({"excludeByName": exclude}))],
            std::slice::from_ref(&frame),
        );
        let expected: Vec<&str> = names
            .iter()
            .zip(&excluded)
            .filter(|(_, e)| !**e)
            .map(|(n, _)| n.as_str())
            .collect();
        prop_assert_eq!(output[0].field_names(), expected);
    }

    #[test]
    fn append_row_count_is_sum(a in 0usize..20, b in 0usize..20) {
        let left = DataFrame::new(vec![Field::numbers("x", vec![1.0; a])]).unwrap();
        let right = DataFrame::new(vec![Field::numbers("y", vec![2.0; b])]).unwrap();
        let output = transform(&[TransformerConfig::new("append", json!({}))], &[left, right]);
        prop_assert_eq!(output[0].length(), a + b);
        prop_assert_eq!(output[0].width(), 2);
    }
}
