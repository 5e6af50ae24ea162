//! Value mapping evaluation.

use frame_model::{SpecialMatch, Value, ValueMapping, parse_number};

/// Result of a matched mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedValue {
    pub text: String,
    pub color: Option<String>,
}

/// Find the first mapping matching `value`.
pub fn get_mapped_value(mappings: &[ValueMapping], value: &Value) -> Option<MappedValue> {
    mappings
        .iter()
        .find(|mapping| mapping_matches(mapping, value))
        .map(|mapping| MappedValue {
            text: mapping.text().to_string(),
            color: mapping.color().map(str::to_string),
        })
}

fn mapping_matches(mapping: &ValueMapping, value: &Value) -> bool {
    match mapping {
        ValueMapping::Value { value: expected, .. } => {
            if value.is_null() {
                return false;
            }
            if value.to_text() == *expected {
                return true;
            }
            let numeric = value.coerce_numeric();
            match parse_number(expected) {
                Some(target) if !numeric.is_nan() && !matches!(value, Value::Bool(_)) => {
                    numeric == target
                }
                _ => false,
            }
        }
        ValueMapping::Range { from, to, .. } => {
            if from.is_none() && to.is_none() {
                return false;
            }
            let numeric = value.coerce_numeric();
            if numeric.is_nan() || matches!(value, Value::Bool(_)) {
                return false;
            }
            from.is_none_or(|from| numeric >= from) && to.is_none_or(|to| numeric <= to)
        }
        ValueMapping::Special { matches, .. } => match matches {
            SpecialMatch::Null => value.is_null(),
            SpecialMatch::NaN => matches!(value, Value::Number(n) if n.is_nan()),
            SpecialMatch::NullAndNaN => value.is_null_or_nan(),
            SpecialMatch::True => is_boolean_like(value, true),
            SpecialMatch::False => is_boolean_like(value, false),
            SpecialMatch::Empty => matches!(value, Value::String(s) if s.is_empty()),
        },
    }
}

fn is_boolean_like(value: &Value, expected: bool) -> bool {
    match value {
        Value::Bool(b) => *b == expected,
        Value::String(s) => s.eq_ignore_ascii_case(if expected { "true" } else { "false" }),
        _ => false,
    }
}
