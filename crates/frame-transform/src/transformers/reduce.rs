//! Reduce each frame to one row of per-field statistics.

use serde::{Deserialize, Serialize};

use frame_model::{DataFrame, Field, FieldType, Value};

use crate::error::{Result, TransformError};
use crate::reducers::ReducerId;
use crate::registry::{Transformer, parse_options};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReduceOptions {
    #[serde(default, alias = "reducers")]
    pub calcs: Vec<ReducerId>,
}

/// `reduce`
///
/// Number fields yield one field per requested reducer. With a single
/// reducer the field keeps its name; with several, names become
/// `"<field> <Reducer>"`. String fields pass through with their last
/// non-null value. Other field types are dropped.
pub struct ReduceTransformer;

impl Transformer for ReduceTransformer {
    fn id(&self) -> &'static str {
        "reduce"
    }

    fn name(&self) -> &'static str {
        "Reduce"
    }

    fn description(&self) -> &'static str {
        "Reduce each field to a single value per calculation"
    }

    fn apply(&self, options: &serde_json::Value, frames: &[DataFrame]) -> Result<Vec<DataFrame>> {
        let options: ReduceOptions = parse_options(self.id(), options)?;
        if options.calcs.is_empty() {
            return Err(TransformError::Message(
                "reduce requires at least one calculation".to_string(),
            ));
        }
        frames
            .iter()
            .map(|frame| reduce_frame(frame, &options.calcs))
            .collect()
    }
}

fn reduce_frame(frame: &DataFrame, calcs: &[ReducerId]) -> Result<DataFrame> {
    let mut fields = Vec::new();
    for field in frame.fields() {
        match field.field_type() {
            FieldType::Number => {
                for calc in calcs {
                    let name = if calcs.len() == 1 {
                        field.name().to_string()
                    } else {
                        format!("{} {}", field.name(), calc.display_name())
                    };
                    let value = calc.reduce(field.values());
                    fields.push(derived_field(field, name, calc.output_type(), value));
                }
            }
            FieldType::String => {
                let last = field
                    .values()
                    .iter()
                    .rev()
                    .find(|value| !value.is_null_or_nan())
                    .cloned()
                    .unwrap_or_default();
                fields.push(field.with_values(vec![last]));
            }
            other => {
                tracing::trace!(field = %field.name(), field_type = %other, "reduce skips field");
            }
        }
    }
    Ok(frame.reshaped(fields, 1)?)
}

fn derived_field(source: &Field, name: String, field_type: FieldType, value: Value) -> Field {
    let field = Field::new(name, field_type, vec![value]).with_config(source.config().clone());
    match source.labels() {
        Some(labels) => field.with_labels(labels.clone()),
        None => field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Field::times("time", [1.0, 2.0, 3.0]),
            Field::numbers("temp", [1.0, f64::NAN, 3.0]),
            Field::strings("host", ["a", "b", "c"]),
        ])
        .unwrap()
        .with_name("weather")
    }

    #[test]
    fn single_calc_keeps_names() {
        let output = ReduceTransformer
            .apply(&json!({"calcs": ["max"]}), &[frame()])
            .unwrap();
        let reduced = &output[0];
        assert_eq!(reduced.field_names(), vec!["temp", "host"]);
        assert_eq!(reduced.length(), 1);
        assert_eq!(reduced.name(), Some("weather"));
        assert_eq!(reduced.fields()[0].values(), &[Value::Number(3.0)]);
        assert_eq!(reduced.fields()[1].values(), &[Value::from("c")]);
    }

    #[test]
    fn boolean_reducers_produce_boolean_fields() {
        let output = ReduceTransformer
            .apply(&json!({"calcs": ["allIsNull", "count"]}), &[frame()])
            .unwrap();
        let fields = output[0].fields();
        assert_eq!(fields[0].name(), "temp All null");
        assert_eq!(fields[0].field_type(), FieldType::Boolean);
        assert_eq!(fields[0].values(), &[Value::Bool(false)]);
        assert_eq!(fields[1].values(), &[Value::Number(2.0)]);
    }

    #[test]
    fn empty_calcs_are_an_error() {
        assert!(ReduceTransformer.apply(&json!({}), &[frame()]).is_err());
        assert!(ReduceTransformer.apply(&json!({"calcs": ["median"]}), &[frame()]).is_err());
    }
}
