//! Build frames from row-oriented JSON.
//!
//! Many data sources answer with an array of flat objects. The adapter turns
//! those rows into columns: one field per key in first-seen order, types
//! guessed from name and values, missing keys filled with null.

use crate::error::{FrameError, Result};
use crate::field::Field;
use crate::frame::DataFrame;
use crate::value::Value;

/// Name of the single field produced from an array of scalars.
pub const SCALAR_FIELD_NAME: &str = "Value";

/// Convert an array of JSON rows into a frame.
///
/// Rows are either all objects (one field per key) or all scalars (a single
/// [`SCALAR_FIELD_NAME`] field). Fields get an empty config.
///
/// # Errors
///
/// Returns [`FrameError::RowNotObject`] when object and scalar rows are mixed.
pub fn array_to_data_frame(rows: &[serde_json::Value]) -> Result<DataFrame> {
    let Some(first) = rows.first() else {
        return DataFrame::new(Vec::new());
    };
    if !first.is_object() {
        return scalars_to_frame(rows);
    }

    let mut names: Vec<String> = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let Some(object) = row.as_object() else {
            return Err(FrameError::RowNotObject {
                row: index,
                kind: json_kind(row),
            });
        };
        for key in object.keys() {
            if !names.iter().any(|name| name == key) {
                names.push(key.clone());
            }
        }
    }

    let fields = names
        .into_iter()
        .map(|name| {
            let values = rows
                .iter()
                .map(|row| row.get(&name).cloned().map_or(Value::Null, Value::from))
                .collect();
            Field::inferred(name, values)
        })
        .collect();

    DataFrame::with_length(fields, rows.len())
}

fn scalars_to_frame(rows: &[serde_json::Value]) -> Result<DataFrame> {
    let mut values = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        if row.is_object() {
            return Err(FrameError::RowNotObject {
                row: index,
                kind: json_kind(row),
            });
        }
        values.push(Value::from(row.clone()));
    }
    DataFrame::new(vec![Field::inferred(SCALAR_FIELD_NAME, values)])
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use serde_json::json;

    #[test]
    fn keys_become_fields_in_first_seen_order() {
        let rows = vec![
            json!({"time": 100, "value": 1.5}),
            json!({"time": 200, "host": "a"}),
        ];
        let frame = array_to_data_frame(&rows).unwrap();
        assert_eq!(frame.field_names(), vec!["time", "value", "host"]);
        assert_eq!(frame.length(), 2);
        assert_eq!(frame.fields()[1].values()[1], Value::Null);
        assert_eq!(frame.fields()[2].field_type(), FieldType::String);
    }

    #[test]
    fn scalars_become_value_field() {
        let frame = array_to_data_frame(&[json!(1), json!(2)]).unwrap();
        assert_eq!(frame.field_names(), vec![SCALAR_FIELD_NAME]);
        assert_eq!(frame.fields()[0].field_type(), FieldType::Number);
    }

    #[test]
    fn mixed_rows_are_rejected() {
        let err = array_to_data_frame(&[json!({"a": 1}), json!(2)]).unwrap_err();
        assert!(matches!(err, FrameError::RowNotObject { row: 1, .. }));
    }

    #[test]
    fn empty_input_is_empty_frame() {
        let frame = array_to_data_frame(&[]).unwrap();
        assert_eq!(frame.width(), 0);
        assert_eq!(frame.length(), 0);
    }
}
