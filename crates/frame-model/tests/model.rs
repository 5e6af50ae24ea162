//! Tests for frame-model types.

use std::collections::BTreeMap;

use frame_model::{
    DataFrame, DataFrameDto, Field, FieldConfig, FieldType, Threshold, ThresholdsConfig, Value,
    array_to_data_frame, frames_from_json, frames_to_json, from_data_frame_dto, to_data_frame_dto,
};
use serde_json::json;

fn sample_dto() -> DataFrameDto {
    serde_json::from_value(json!({
        "name": "weather",
        "refId": "A",
        "meta": {"executedQueryString": "SELECT *"},
        "fields": [
            {"name": "time", "type": "time", "config": {}, "values": [1000, 2000]},
            {
                "name": "temperature",
                "type": "number",
                "config": {
                    "unit": "celsius",
                    "decimals": 1,
                    "thresholds": {"mode": "absolute", "steps": [
                        {"value": null, "color": "green"},
                        {"value": 30, "color": "red"}
                    ]}
                },
                "labels": {"city": "Berlin"},
                "values": [21.5, null]
            }
        ]
    }))
    .unwrap()
}

#[test]
fn dto_round_trips_exactly() {
    let dto = sample_dto();
    let frame = from_data_frame_dto(dto.clone()).unwrap();
    assert_eq!(to_data_frame_dto(&frame), dto);
}

#[test]
fn dto_round_trip_preserves_json_shape() {
    let dto = sample_dto();
    let original = serde_json::to_value(&dto).unwrap();
    let frame = DataFrame::try_from(dto).unwrap();
    let back = serde_json::to_value(DataFrameDto::from(&frame)).unwrap();
    assert_eq!(back, original);
    // Absent optional keys are omitted, not emitted as empty objects.
    assert!(back["fields"][0].get("labels").is_none());
    assert_eq!(back["fields"][0]["config"], json!({}));
}

#[test]
fn frames_json_reproduces_the_wire_text() {
    let raw = r#"[{
        "name": "weather",
        "refId": "A",
        "meta": {"rows": 2},
        "fields": [
            {"name": "time", "type": "time", "config": {}, "values": [1000, 2000]},
            {
                "name": "temperature",
                "type": "number",
                "config": {
                    "decimals": 1,
                    "min": 0,
                    "max": 40,
                    "thresholds": {"mode": "absolute", "steps": [
                        {"value": null, "color": "green"},
                        {"value": 30, "color": "red"}
                    ]},
                    "mappings": [{"type": "range", "from": -10, "to": 0, "text": "freezing"}]
                },
                "values": [21, null]
            }
        ]
    }]"#;
    let frames = frames_from_json(raw).unwrap();
    let written = frames_to_json(&frames).unwrap();

    let original: serde_json::Value = serde_json::from_str(raw).unwrap();
    let back: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(back, original);
    assert!(written.contains("1000"));
    assert!(!written.contains("1000.0"));
}

#[test]
fn threshold_base_step_is_negative_infinity() {
    let frame = from_data_frame_dto(sample_dto()).unwrap();
    let thresholds = frame.fields()[1].config().thresholds.clone().unwrap();
    assert_eq!(thresholds.steps[0].value, f64::NEG_INFINITY);
    assert_eq!(thresholds.steps[1], Threshold::new(30.0, "red"));
}

#[test]
fn array_adapter_reproduces_names_types_and_values() {
    let rows = vec![
        json!({"time": 100, "name": "a", "value": 1.5, "ok": true}),
        json!({"time": 200, "name": "b", "value": 2.5, "ok": false}),
    ];
    let frame = array_to_data_frame(&rows).unwrap();
    let dto = to_data_frame_dto(&frame);

    let names: Vec<&str> = dto.fields.iter().map(|f| f.name.as_str()).collect();
    insta::assert_debug_snapshot!(names, @r#"
    [
        "time",
        "name",
        "value",
        "ok",
    ]
    "#);

    let types: Vec<Option<FieldType>> = dto.fields.iter().map(|f| f.field_type).collect();
    assert_eq!(
        types,
        vec![
            Some(FieldType::Time),
            Some(FieldType::String),
            Some(FieldType::Number),
            Some(FieldType::Boolean),
        ]
    );
    assert_eq!(
        dto.fields[2].values,
        vec![Value::Number(1.5), Value::Number(2.5)]
    );
    assert_eq!(dto.fields[3].values, vec![Value::Bool(true), Value::Bool(false)]);
    for field in &dto.fields {
        assert!(field.config.is_empty());
        assert_eq!(serde_json::to_value(&field.config).unwrap(), json!({}));
    }
}

#[test]
fn frames_json_helpers_round_trip() {
    let frame = DataFrame::new(vec![
        Field::numbers("value", [1.0, 2.0]).with_config(
            FieldConfig::default()
                .with_unit("percent")
                .with_thresholds(ThresholdsConfig::absolute(vec![Threshold::base("blue")])),
        ),
        Field::strings("host", ["a", "b"])
            .with_labels(BTreeMap::from([("dc".to_string(), "eu".to_string())])),
    ])
    .unwrap()
    .with_name("load");

    let json = frames_to_json(std::slice::from_ref(&frame)).unwrap();
    let frames = frames_from_json(&json).unwrap();
    assert_eq!(frames, vec![frame]);
}

#[test]
fn shared_values_survive_clone() {
    let field = Field::numbers("a", [1.0, 2.0, 3.0]);
    let frame = DataFrame::new(vec![field.clone()]).unwrap();
    assert!(frame.fields()[0].shares_values_with(&field));
}
